use super::ProjectId;
use serde::{Deserialize, Serialize};

/// Projects applied to, in the order the applications were sent. An
/// identifier is never present twice.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ProjectId>", into = "Vec<ProjectId>")]
pub struct ApplicationSet(Vec<ProjectId>);

impl ApplicationSet {
    pub fn new() -> ApplicationSet {
        ApplicationSet::default()
    }

    pub fn contains(&self, project: ProjectId) -> bool {
        self.0.contains(&project)
    }

    /// Record an application. Returns `false` if `project` was already there.
    pub fn insert(&mut self, project: ProjectId) -> bool {
        if self.contains(project) {
            false
        } else {
            self.0.push(project);
            true
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[ProjectId] {
        &self.0
    }
}

impl From<Vec<ProjectId>> for ApplicationSet {
    fn from(ids: Vec<ProjectId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<ApplicationSet> for Vec<ProjectId> {
    fn from(set: ApplicationSet) -> Self {
        set.0
    }
}

impl FromIterator<ProjectId> for ApplicationSet {
    fn from_iter<I: IntoIterator<Item = ProjectId>>(iter: I) -> Self {
        let mut set = ApplicationSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[test]
fn test_insert_once() {
    let mut set = ApplicationSet::new();
    assert!(set.insert(ProjectId(4)));
    assert!(set.insert(ProjectId(2)));
    assert!(!set.insert(ProjectId(4)));
    assert_eq!(set.ids(), &[ProjectId(4), ProjectId(2)]);
    set.clear();
    assert!(set.is_empty());
}

#[test]
fn test_persisted_form() {
    let set: ApplicationSet = serde_json::from_str("[3,1]").unwrap();
    assert_eq!(set.ids(), &[ProjectId(3), ProjectId(1)]);
    assert_eq!(serde_json::to_string(&set).unwrap(), "[3,1]");
    let set: ApplicationSet = serde_json::from_str("[1,1,5]").unwrap();
    assert_eq!(set.ids(), &[ProjectId(1), ProjectId(5)]);
}
