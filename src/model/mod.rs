pub use self::applications::ApplicationSet;
pub use self::identity::{Identity, Role};
pub use self::project::{Category, Field, Project, ProjectId};

mod applications;
mod identity;
mod project;
