use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown in place of an empty requirements list.
pub const DEFAULT_REQUIREMENT: &str = "General Research Enthusiasm";

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u32);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProjectId)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    It,
    Biology,
    Engineering,
    SocialScience,
    Agriculture,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::It,
        Field::Biology,
        Field::Engineering,
        Field::SocialScience,
        Field::Agriculture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::It => "IT",
            Field::Biology => "Biology",
            Field::Engineering => "Engineering",
            Field::SocialScience => "Social Science",
            Field::Agriculture => "Agriculture",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// Category selector of the catalog filter: every field, or exactly one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Category {
    #[default]
    All,
    Only(Field),
}

impl Category {
    pub fn accepts(self, field: Field) -> bool {
        match self {
            Category::All => true,
            Category::Only(f) => f == field,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::All => f.write_str("All"),
            Category::Only(field) => fmt::Display::fmt(field, f),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Category::All)
        } else {
            s.parse().map(Category::Only)
        }
    }
}

#[derive(Debug)]
pub struct Project {
    pub id: ProjectId,
    pub title: &'static str,
    pub field: Field,
    pub researcher: &'static str,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
}

impl Project {
    /// Requirements as displayed, with the placeholder standing in for an
    /// empty list.
    pub fn displayed_requirements(&self) -> Vec<&'static str> {
        if self.requirements.is_empty() {
            vec![DEFAULT_REQUIREMENT]
        } else {
            self.requirements.to_vec()
        }
    }

    /// Case-insensitive match of `term` against the title or the description.
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

#[test]
fn test_category_parsing() {
    assert_eq!("All".parse::<Category>(), Ok(Category::All));
    assert_eq!(
        "social science".parse::<Category>(),
        Ok(Category::Only(Field::SocialScience))
    );
    assert_eq!("IT".parse::<Category>(), Ok(Category::Only(Field::It)));
    assert!("Chemistry".parse::<Category>().is_err());
    assert_eq!(Category::Only(Field::Agriculture).to_string(), "Agriculture");
}

#[test]
fn test_displayed_requirements() {
    let p = Project {
        id: ProjectId(42),
        title: "Dummy",
        field: Field::It,
        researcher: "Dr. Nobody",
        description: "Nothing to see",
        requirements: &[],
    };
    assert_eq!(p.displayed_requirements(), vec![DEFAULT_REQUIREMENT]);
    let p = Project {
        requirements: &["Rust", "Patience"],
        ..p
    };
    assert_eq!(p.displayed_requirements(), vec!["Rust", "Patience"]);
}

#[test]
fn test_mentions() {
    let p = Project {
        id: ProjectId(1),
        title: "Marine Biology Survey",
        field: Field::Biology,
        researcher: "Prof. K. Silva",
        description: "Coral reef health",
        requirements: &[],
    };
    assert!(p.mentions("MARINE"));
    assert!(p.mentions("reef"));
    assert!(p.mentions(""));
    assert!(!p.mentions("concrete"));
}
