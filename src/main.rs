use crate::app::{Action, App, NewProject};
use crate::config::{Config, StorageKind};
use crate::model::{Category, Field, ProjectId, Role};
use crate::session::Session;
use crate::storage::{Backend, FileStore, KeyValueStore, MemoryStore, SqlStore};
use clap::{Parser, Subcommand};
use eyre::{WrapErr, bail};
use std::path::PathBuf;
use tracing::{Level, info};

mod app;
mod card;
mod catalog;
mod config;
mod dashboard;
mod display;
mod model;
mod router;
mod session;
mod shell;
mod storage;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Use FILE instead of rover.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Keep the session in DIR (file storage only)
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,
    /// Do not read or write the saved session
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Set verbosity level
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List research projects
    Browse {
        /// Only keep projects mentioning TEXT
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        search: String,
        /// Only keep projects of this field, or All
        #[arg(long, default_value = "All")]
        category: Category,
    },
    /// Show the details of a project
    Show { id: ProjectId },
    /// Apply to a project
    Apply { id: ProjectId },
    /// Log in (no password is needed)
    Login {
        email: String,
        #[arg(short, long, default_value = "student")]
        role: Role,
    },
    /// Log out and forget applications
    Logout,
    /// Show the dashboard of the logged in user
    Dashboard,
    /// Post a new project (not saved anywhere)
    Post {
        #[arg(short, long)]
        field: Field,
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Start an interactive session (default)
    Shell,
}

impl Command {
    fn actions(self) -> Vec<Action> {
        match self {
            Command::Browse { search, category } => vec![
                Action::Navigate("home".into()),
                Action::Search(search),
                Action::FilterCategory(category),
            ],
            Command::Show { id } => vec![Action::OpenProjectDetail(id)],
            Command::Apply { id } => vec![
                Action::OpenProjectDetail(id),
                Action::ConfirmApplication,
            ],
            Command::Login { email, role } => vec![Action::SubmitLogin {
                email,
                role: Some(role),
            }],
            Command::Logout => vec![Action::Logout],
            Command::Dashboard => vec![Action::Navigate("dashboard".into())],
            Command::Post {
                field,
                title,
                description,
            } => vec![
                Action::OpenPostProject,
                Action::SubmitNewProject(NewProject {
                    title,
                    field,
                    description,
                }),
            ],
            Command::Shell => Vec::new(),
        }
    }
}

async fn open_backend(config: &Config, options: &Options) -> eyre::Result<Backend> {
    if options.dry_run {
        return Ok(Backend::Memory(MemoryStore::new()));
    }
    if let Some(dir) = &options.store {
        return Ok(Backend::File(FileStore::new(dir.clone())));
    }
    Ok(match config.storage.backend {
        StorageKind::File => Backend::File(FileStore::new(config.storage.path.clone())),
        StorageKind::Database => {
            let Some(url) = &config.storage.url else {
                bail!("storage.url must be set for the database backend");
            };
            Backend::Sql(
                SqlStore::new(url)
                    .await
                    .wrap_err("cannot connect to the session database")?,
            )
        }
    })
}

async fn run_once<S: KeyValueStore>(app: &mut App<S>, actions: Vec<Action>) -> eyre::Result<()> {
    // Scrolling has no meaning for a single screen, effects are dropped.
    for action in actions {
        app.dispatch(action).await?;
    }
    shell::render(&mut std::io::stdout(), app, &[]).await
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let options = Options::parse();
    let level = match options.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load(options.config.as_deref())?;
    let backend = open_backend(&config, &options).await?;
    let mut app = App::new(Session::new(backend), config.ui.toast_duration());
    app.restore().await.wrap_err("cannot restore the saved session")?;
    match options.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            info!("starting interactive session");
            shell::run(&mut app).await
        }
        command => run_once(&mut app, command.actions()).await,
    }
}
