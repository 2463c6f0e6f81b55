use crate::app::{App, Modal, Toast};
use crate::card::Card;
use crate::dashboard::Dashboard;
use crate::model::{Field, Project};
use crate::router::View;
use crate::storage::KeyValueStore;
use std::io::{self, Write};

pub fn display_nav<S: KeyValueStore>(out: &mut impl Write, app: &App<S>) -> io::Result<()> {
    let links = app
        .nav_links()
        .iter()
        .map(|l| l.label())
        .collect::<Vec<_>>()
        .join(" | ");
    match app.identity() {
        Some(identity) => writeln!(out, "[Research Rover] {links}   ({identity})"),
        None => writeln!(out, "[Research Rover] {links}"),
    }
}

fn display_card(out: &mut impl Write, card: &Card) -> io::Result<()> {
    let p = card.project;
    writeln!(out, "  #{} {} [{}]", p.id, p.title, p.field)?;
    writeln!(out, "     {}", p.researcher)?;
    writeln!(out, "     {}", p.description)?;
    if card.affordance.is_interactive() {
        writeln!(out, "     > {} (view {})", card.affordance.label(), p.id)
    } else {
        writeln!(out, "     [{}]", card.affordance.label())
    }
}

pub fn display_catalog<S: KeyValueStore>(out: &mut impl Write, app: &App<S>) -> io::Result<()> {
    writeln!(out, "Research opportunities")?;
    let filters = Field::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(
        out,
        "  search: {:?}  category: {} (All, {})",
        app.search(),
        app.category(),
        filters
    )?;
    let cards = app.catalog_cards();
    if cards.is_empty() {
        writeln!(out, "  No project matches your search.")?;
    }
    for card in &cards {
        display_card(out, card)?;
    }
    Ok(())
}

pub fn display_dashboard(out: &mut impl Write, dashboard: &Dashboard) -> io::Result<()> {
    writeln!(out, "{} - {}", dashboard.name, dashboard.role_label)?;
    for stat in &dashboard.stats {
        writeln!(out, "  {:>3}  {}", stat.value, stat.label)?;
    }
    writeln!(out, "  > {}", dashboard.action_label)?;
    writeln!(out)?;
    writeln!(out, "{}:", dashboard.list_title)?;
    if let Some(message) = dashboard.empty_message {
        writeln!(out, "  {message}")?;
    }
    for card in &dashboard.cards {
        display_card(out, card)?;
    }
    Ok(())
}

pub fn display_detail(out: &mut impl Write, project: &Project) -> io::Result<()> {
    writeln!(out, "+ {} [{}]", project.title, project.field)?;
    writeln!(out, "| {}", project.researcher)?;
    writeln!(out, "| {}", project.description)?;
    writeln!(out, "| Requirements:")?;
    for requirement in project.displayed_requirements() {
        writeln!(out, "|   - {requirement}")?;
    }
    writeln!(out, "+ confirm to apply, close to go back")
}

pub fn display_toast(out: &mut impl Write, toast: &Toast) -> io::Result<()> {
    if toast.is_error {
        writeln!(out, "(!) {}", toast.message)
    } else {
        writeln!(out, "(i) {}", toast.message)
    }
}

/// Render the whole screen for the current state.
pub fn display<S: KeyValueStore>(out: &mut impl Write, app: &App<S>) -> io::Result<()> {
    display_nav(out, app)?;
    writeln!(out)?;
    match app.view() {
        View::Home => display_catalog(out, app)?,
        View::Auth => {
            writeln!(out, "{}", app.auth_title())?;
            writeln!(
                out,
                "  role: {} (switch with: role student|researcher)",
                app.selected_role()
            )?;
            writeln!(out, "  log in with: login <email>")?;
        }
        View::Dashboard => match app.dashboard() {
            Some(dashboard) => display_dashboard(out, &dashboard)?,
            None => writeln!(out, "Log in to see your dashboard.")?,
        },
    }
    match app.modal() {
        Some(Modal::ProjectDetail(_)) => {
            if let Some(project) = app.detail() {
                writeln!(out)?;
                display_detail(out, project)?;
            }
        }
        Some(Modal::PostProject) => {
            writeln!(out)?;
            writeln!(out, "+ Post a new project: post <field> <title>, or close")?;
        }
        None => (),
    }
    if let Some(toast) = app.toast() {
        writeln!(out)?;
        display_toast(out, toast)?;
    }
    Ok(())
}
