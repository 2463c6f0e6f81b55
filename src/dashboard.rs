use crate::card::{Card, cards};
use crate::catalog::CATALOG;
use crate::model::{ApplicationSet, Identity, Project, Role};

#[derive(Debug, Eq, PartialEq)]
pub struct Stat {
    pub value: usize,
    pub label: &'static str,
}

#[derive(Debug)]
pub struct Dashboard<'a> {
    pub name: &'a str,
    pub role_label: &'static str,
    pub action_label: &'static str,
    pub list_title: &'static str,
    pub stats: Vec<Stat>,
    pub cards: Vec<Card<'static>>,
    /// Shown instead of the cards when there are none.
    pub empty_message: Option<&'static str>,
}

/// Researchers have no real project ownership; they are shown the first and
/// third catalog entries as if they had posted them.
fn mock_posted_projects() -> impl Iterator<Item = &'static Project> {
    [0, 2].into_iter().filter_map(|idx| CATALOG.get(idx))
}

pub fn compose<'a>(identity: &'a Identity, applications: &ApplicationSet) -> Dashboard<'a> {
    let role = Some(identity.role);
    match identity.role {
        Role::Student => {
            let applied = CATALOG.iter().filter(|p| applications.contains(p.id));
            let cards = cards(applied, true, role, applications);
            Dashboard {
                name: &identity.name,
                role_label: identity.role.label(),
                action_label: "Browse Projects",
                list_title: "My Applications",
                stats: vec![
                    Stat {
                        value: applications.len(),
                        label: "Applications Sent",
                    },
                    Stat {
                        value: 0,
                        label: "Saved Projects",
                    },
                    Stat {
                        value: 0,
                        label: "Accepted",
                    },
                ],
                empty_message: cards
                    .is_empty()
                    .then_some("You haven't applied to any projects yet."),
                cards,
            }
        }
        Role::Researcher => Dashboard {
            name: &identity.name,
            role_label: identity.role.label(),
            action_label: "Post New Project",
            list_title: "My Posted Projects",
            stats: vec![
                Stat {
                    value: 2,
                    label: "Active Projects",
                },
                Stat {
                    value: 12,
                    label: "Applicants",
                },
            ],
            cards: cards(mock_posted_projects(), true, role, applications),
            empty_message: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Affordance;
    use crate::model::ProjectId;

    #[test]
    fn test_student_without_applications() {
        let identity = Identity::from_email("jane@x.com", Role::Student);
        let dashboard = compose(&identity, &ApplicationSet::new());
        assert_eq!(dashboard.stats[0].value, 0);
        assert!(dashboard.cards.is_empty());
        assert!(dashboard.empty_message.is_some());
        assert_eq!(dashboard.role_label, "Student Researcher");
    }

    #[test]
    fn test_student_applications_in_catalog_order() {
        let identity = Identity::from_email("jane@x.com", Role::Student);
        let applications: ApplicationSet = [ProjectId(5), ProjectId(2)].into_iter().collect();
        let dashboard = compose(&identity, &applications);
        assert_eq!(dashboard.stats[0].value, 2);
        assert_eq!(
            dashboard
                .cards
                .iter()
                .map(|c| (c.project.id, c.affordance))
                .collect::<Vec<_>>(),
            vec![
                (ProjectId(2), Affordance::PendingStatus),
                (ProjectId(5), Affordance::PendingStatus)
            ]
        );
        assert!(dashboard.empty_message.is_none());
    }

    #[test]
    fn test_researcher_mock_projects() {
        let identity = Identity::from_email("silva@uni.lk", Role::Researcher);
        let dashboard = compose(&identity, &ApplicationSet::new());
        assert_eq!(dashboard.name, "Silva");
        assert_eq!(dashboard.list_title, "My Posted Projects");
        assert_eq!(
            dashboard
                .cards
                .iter()
                .map(|c| (c.project.id, c.affordance))
                .collect::<Vec<_>>(),
            vec![
                (ProjectId(1), Affordance::Manage),
                (ProjectId(3), Affordance::Manage)
            ]
        );
        assert_eq!(
            dashboard.stats,
            vec![
                Stat {
                    value: 2,
                    label: "Active Projects"
                },
                Stat {
                    value: 12,
                    label: "Applicants"
                }
            ]
        );
    }
}
