use crate::model::Identity;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum View {
    #[default]
    Home,
    Auth,
    Dashboard,
}

impl View {
    pub const ALL: [View; 3] = [View::Home, View::Auth, View::Dashboard];

    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Auth => "auth",
            View::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for View {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL.into_iter().find(|v| v.name() == s).ok_or(())
    }
}

/// Tracks the single visible view. Starts on [`View::Home`].
#[derive(Debug, Default)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    #[cfg(test)]
    pub fn is_active(&self, view: View) -> bool {
        self.current == view
    }

    /// Switch to the view called `name`. Unknown names leave the current view
    /// in place; the returned value tells whether a transition happened.
    pub fn navigate_to(&mut self, name: &str) -> Option<View> {
        match name.parse() {
            Ok(view) => {
                self.show(view);
                Some(view)
            }
            Err(()) => {
                debug!(name, "ignoring navigation to unknown view");
                None
            }
        }
    }

    pub fn show(&mut self, view: View) {
        debug!(from = %self.current, to = %view, "navigating");
        self.current = view;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavLink {
    Home,
    Opportunities,
    Dashboard,
    Login,
    Logout,
}

impl NavLink {
    pub fn label(self) -> &'static str {
        match self {
            NavLink::Home => "Home",
            NavLink::Opportunities => "Opportunities",
            NavLink::Dashboard => "My Dashboard",
            NavLink::Login => "Login",
            NavLink::Logout => "Logout",
        }
    }
}

/// Links of the navigation bar, which only depend on who is logged in.
pub fn nav_links(identity: Option<&Identity>) -> Vec<NavLink> {
    match identity {
        Some(_) => vec![
            NavLink::Home,
            NavLink::Opportunities,
            NavLink::Dashboard,
            NavLink::Logout,
        ],
        None => vec![NavLink::Home, NavLink::Opportunities, NavLink::Login],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    #[test]
    fn test_starts_home() {
        assert_eq!(Router::new().current(), View::Home);
    }

    #[test]
    fn test_unknown_view_is_ignored() {
        let mut router = Router::new();
        assert_eq!(router.navigate_to("auth"), Some(View::Auth));
        assert_eq!(router.navigate_to("settings"), None);
        assert_eq!(router.current(), View::Auth);
    }

    #[test]
    fn test_repeated_navigation() {
        let mut router = Router::new();
        for _ in 0..2 {
            router.navigate_to("dashboard");
        }
        assert_eq!(
            View::ALL.iter().filter(|&&v| router.is_active(v)).collect::<Vec<_>>(),
            vec![&View::Dashboard]
        );
        router.navigate_to("home");
        assert!(router.is_active(View::Home));
    }

    #[test]
    fn test_nav_links() {
        assert!(nav_links(None).contains(&NavLink::Login));
        let identity = Identity::from_email("jane@x.com", Role::Student);
        let links = nav_links(Some(&identity));
        assert!(links.contains(&NavLink::Dashboard));
        assert!(links.contains(&NavLink::Logout));
        assert!(!links.contains(&NavLink::Login));
    }
}
