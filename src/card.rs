use crate::model::{ApplicationSet, Project, Role};

/// What a project card offers the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Affordance {
    /// Opens the project details, from where one can apply.
    Apply,
    /// Disabled: the application has already been sent.
    Applied,
    PendingStatus,
    Manage,
}

impl Affordance {
    pub fn label(self) -> &'static str {
        match self {
            Affordance::Apply => "Apply Now",
            Affordance::Applied => "Applied",
            Affordance::PendingStatus => "Pending Status",
            Affordance::Manage => "Manage",
        }
    }

    pub fn is_interactive(self) -> bool {
        self == Affordance::Apply
    }
}

pub fn affordance(
    project: &Project,
    on_dashboard: bool,
    role: Option<Role>,
    applications: &ApplicationSet,
) -> Affordance {
    match (on_dashboard, role) {
        (true, Some(Role::Student)) => Affordance::PendingStatus,
        (true, Some(Role::Researcher)) => Affordance::Manage,
        _ if applications.contains(project.id) => Affordance::Applied,
        _ => Affordance::Apply,
    }
}

#[derive(Debug)]
pub struct Card<'a> {
    pub project: &'a Project,
    pub affordance: Affordance,
}

pub fn cards<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    on_dashboard: bool,
    role: Option<Role>,
    applications: &ApplicationSet,
) -> Vec<Card<'a>> {
    projects
        .into_iter()
        .map(|project| Card {
            project,
            affordance: affordance(project, on_dashboard, role, applications),
        })
        .collect()
}
