use crate::app::{Action, App, Effect, NewProject};
use crate::display;
use crate::model::Field;
use crate::storage::KeyValueStore;
use eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  home | auth | dashboard | go <view>   switch view
  opportunities                         show the project catalog
  search [text]                         filter projects by text (empty clears)
  category <All|IT|Biology|...>         filter projects by field
  view <id>                             open project details
  confirm                               apply to the open project
  close                                 close the open dialog
  role <student|researcher>             select the login tab
  login <email> [student|researcher]    log in (no password needed)
  logout                                log out
  action                                dashboard button
  post [<field> <title>]                post a new project
  help | quit";

#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    Act(Action),
    Help,
    Quit,
    Nothing,
}

/// Split off the first word of `line`, returning it and the trimmed rest.
fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}

/// Split a leading field name, which may contain spaces, off `rest`.
fn split_field(rest: &str) -> Result<(Field, &str), String> {
    Field::ALL
        .into_iter()
        .find_map(|field| {
            let name = field.name();
            let head = rest.get(..name.len())?;
            let tail = &rest[name.len()..];
            (head.eq_ignore_ascii_case(name) && (tail.is_empty() || tail.starts_with(' ')))
                .then(|| (field, tail.trim()))
        })
        .ok_or_else(|| format!("unknown field in: {rest:?}"))
}

pub fn parse(line: &str) -> Result<Command, String> {
    let (word, rest) = split_word(line);
    let action = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Nothing),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "home" | "auth" | "dashboard" => Action::Navigate(word.to_ascii_lowercase()),
        "go" => Action::Navigate(rest.to_owned()),
        "opportunities" => Action::Opportunities,
        "search" => Action::Search(rest.to_owned()),
        "category" => Action::FilterCategory(rest.parse()?),
        "view" => Action::OpenProjectDetail(
            rest.parse()
                .map_err(|_| format!("not a project number: {rest:?}"))?,
        ),
        "confirm" => Action::ConfirmApplication,
        "close" => Action::CloseModal,
        "role" => Action::SelectRole(rest.parse()?),
        "login" => {
            let (email, role) = split_word(rest);
            Action::SubmitLogin {
                email: email.to_owned(),
                role: if role.is_empty() {
                    None
                } else {
                    Some(role.parse()?)
                },
            }
        }
        "logout" => Action::Logout,
        "action" => Action::DashboardAction,
        "post" if rest.is_empty() => Action::OpenPostProject,
        "post" => {
            let (field, title) = split_field(rest)?;
            Action::SubmitNewProject(NewProject {
                title: title.to_owned(),
                field,
                description: String::new(),
            })
        }
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(Command::Act(action))
}

/// Apply the side effects requested by an action, then redraw.
pub async fn render<S: KeyValueStore>(
    out: &mut impl Write,
    app: &App<S>,
    effects: &[Effect],
) -> Result<()> {
    for effect in effects {
        match *effect {
            Effect::ScrollToTop => writeln!(out, "\n----------------------------------------")?,
            Effect::ScrollToCatalog { after } => {
                tokio::time::sleep(after).await;
                debug!("scrolled to the catalog");
            }
        }
    }
    display::display(out, app)?;
    out.flush()?;
    Ok(())
}

/// Interactive loop: one command per line until end of input or `quit`.
pub async fn run<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    let mut stdout = std::io::stdout();
    render(&mut stdout, app, &[]).await?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "rover> ")?;
        stdout.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => (),
            Ok(Command::Help) => writeln!(stdout, "{HELP}")?,
            Ok(Command::Act(action)) => {
                let effects = app.handle(action).await;
                render(&mut stdout, app, &effects).await?;
            }
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ProjectId, Role};

    fn act(line: &str) -> Action {
        match parse(line) {
            Ok(Command::Act(action)) => action,
            other => panic!("{line:?} parsed as {other:?}"),
        }
    }

    #[test]
    fn test_navigation() {
        assert_eq!(act("home"), Action::Navigate("home".into()));
        assert_eq!(act("  Dashboard "), Action::Navigate("dashboard".into()));
        assert_eq!(act("go nowhere"), Action::Navigate("nowhere".into()));
        assert_eq!(act("opportunities"), Action::Opportunities);
    }

    #[test]
    fn test_login() {
        assert_eq!(
            act("login jane.doe@x.com"),
            Action::SubmitLogin {
                email: "jane.doe@x.com".into(),
                role: None
            }
        );
        assert_eq!(
            act("login silva@uni.lk researcher"),
            Action::SubmitLogin {
                email: "silva@uni.lk".into(),
                role: Some(Role::Researcher)
            }
        );
        assert!(parse("login a@b.c admin").is_err());
    }

    #[test]
    fn test_catalog_commands() {
        assert_eq!(act("search coral reef"), Action::Search("coral reef".into()));
        assert_eq!(act("search"), Action::Search(String::new()));
        assert_eq!(
            act("category social science"),
            Action::FilterCategory(Category::Only(Field::SocialScience))
        );
        assert_eq!(act("view 3"), Action::OpenProjectDetail(ProjectId(3)));
        assert!(parse("view three").is_err());
    }

    #[test]
    fn test_post() {
        assert_eq!(act("post"), Action::OpenPostProject);
        assert_eq!(
            act("post Biology Mangrove carbon stocks"),
            Action::SubmitNewProject(NewProject {
                title: "Mangrove carbon stocks".into(),
                field: Field::Biology,
                description: String::new(),
            })
        );
        assert_eq!(
            act("post social science Oral histories"),
            Action::SubmitNewProject(NewProject {
                title: "Oral histories".into(),
                field: Field::SocialScience,
                description: String::new(),
            })
        );
        assert!(parse("post Chemistry Titration").is_err());
    }

    #[test]
    fn test_misc() {
        assert_eq!(parse("").unwrap(), Command::Nothing);
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
        assert!(parse("dance").is_err());
    }
}
