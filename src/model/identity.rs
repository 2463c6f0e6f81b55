use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Researcher,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student Researcher",
            Role::Researcher => "Lead Researcher",
        }
    }

    /// Title of the login form while this role's tab is selected.
    pub fn welcome(self) -> &'static str {
        match self {
            Role::Student => "Welcome Student",
            Role::Researcher => "Welcome Researcher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Role::Student => "student",
            Role::Researcher => "researcher",
        })
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "researcher" => Ok(Role::Researcher),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub role: Role,
}

impl Identity {
    /// Build the identity of a mock login. The display name is the part of
    /// `email` before the first `@`, with its first character upper-cased.
    pub fn from_email(email: &str, role: Role) -> Identity {
        let local = email.split('@').next().unwrap_or_default();
        let mut chars = local.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Identity { name, role }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.role.label())
    }
}

#[test]
fn test_from_email() {
    let id = Identity::from_email("jane.doe@x.com", Role::Student);
    assert_eq!(id.name, "Jane.doe");
    assert_eq!(id.role, Role::Student);
    assert_eq!(Identity::from_email("kamal", Role::Researcher).name, "Kamal");
    assert_eq!(Identity::from_email("élodie@uni.lk", Role::Student).name, "Élodie");
    assert_eq!(Identity::from_email("@nowhere", Role::Student).name, "");
}

#[test]
fn test_serialized_form() {
    let id = Identity::from_email("sam@rfc1149.net", Role::Researcher);
    assert_eq!(
        serde_json::to_string(&id).unwrap(),
        r#"{"name":"Sam","role":"researcher"}"#
    );
    let back: Identity = serde_json::from_str(r#"{"name":"Sam","role":"researcher"}"#).unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_role_parsing() {
    assert_eq!("Researcher".parse::<Role>(), Ok(Role::Researcher));
    assert_eq!(" student ".parse::<Role>(), Ok(Role::Student));
    assert!("admin".parse::<Role>().is_err());
}
