//! Controller binding user actions to the session, the router and the
//! catalog filter.
//!
//! Front-ends translate their input into [`Action`]s, feed them to
//! [`App::dispatch`] and then render whatever the accessors report. The
//! controller never draws anything itself.

use crate::card::{Card, cards};
use crate::catalog;
use crate::dashboard::{self, Dashboard};
use crate::model::{Category, Field, Identity, Project, ProjectId, Role};
use crate::router::{NavLink, Router, View, nav_links};
use crate::session::{ApplyOutcome, Session};
use crate::storage::{KeyValueStore, StoreResult};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Delay between showing the home view and scrolling down to the catalog.
pub const CATALOG_SCROLL_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub field: Field,
    pub description: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Navigate(String),
    /// Show the catalog section of the home view.
    Opportunities,
    SelectRole(Role),
    /// Log in with `role`, or with the selected role tab if `None`.
    SubmitLogin {
        email: String,
        role: Option<Role>,
    },
    Logout,
    Search(String),
    FilterCategory(Category),
    OpenProjectDetail(ProjectId),
    ConfirmApplication,
    OpenPostProject,
    SubmitNewProject(NewProject),
    /// The role-dependent button at the top of the dashboard.
    DashboardAction,
    CloseModal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Modal {
    ProjectDetail(ProjectId),
    PostProject,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    ScrollToTop,
    ScrollToCatalog { after: Duration },
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    shown_at: Instant,
}

pub struct App<S> {
    session: Session<S>,
    router: Router,
    search: String,
    category: Category,
    modal: Option<Modal>,
    current_project: Option<ProjectId>,
    selected_role: Role,
    toast: Option<Toast>,
    toast_duration: Duration,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: Session<S>, toast_duration: Duration) -> App<S> {
        App {
            session,
            router: Router::new(),
            search: String::new(),
            category: Category::All,
            modal: None,
            current_project: None,
            selected_role: Role::default(),
            toast: None,
            toast_duration,
        }
    }

    /// Pick up the session saved by a previous run. The view stays on home.
    pub async fn restore(&mut self) -> StoreResult<()> {
        self.session.restore().await?;
        Ok(())
    }

    /// Dispatch `action`, turning a storage failure into an error toast so
    /// that an interactive session can go on.
    pub async fn handle(&mut self, action: Action) -> Vec<Effect> {
        match self.dispatch(action).await {
            Ok(effects) => effects,
            Err(e) => {
                warn!(error = %e, "action failed");
                self.error(format!("Something went wrong: {e}"));
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, action: Action) -> StoreResult<Vec<Effect>> {
        let mut effects = Vec::new();
        match action {
            Action::Navigate(name) => self.navigate(&name, &mut effects),
            Action::Opportunities => self.opportunities(&mut effects),
            Action::SelectRole(role) => self.selected_role = role,
            Action::SubmitLogin { email, role } => {
                if email.trim().is_empty() {
                    self.error("Please enter your email address.");
                } else {
                    let role = role.unwrap_or(self.selected_role);
                    let identity = self.session.login(&email, role).await?;
                    self.notify(format!("Welcome back, {}!", identity.name));
                    self.navigate(View::Dashboard.name(), &mut effects);
                }
            }
            Action::Logout => {
                self.session.logout().await?;
                self.notify("Logged out successfully.");
                self.navigate(View::Home.name(), &mut effects);
            }
            Action::Search(term) => self.search = term,
            Action::FilterCategory(category) => self.category = category,
            Action::OpenProjectDetail(id) => {
                if catalog::find(id).is_some() {
                    self.current_project = Some(id);
                    self.modal = Some(Modal::ProjectDetail(id));
                } else {
                    debug!(%id, "no such project");
                }
            }
            Action::ConfirmApplication => self.confirm_application(&mut effects).await?,
            Action::OpenPostProject => self.modal = Some(Modal::PostProject),
            Action::SubmitNewProject(project) => {
                // Posting is not wired to any storage.
                info!(title = %project.title, field = %project.field, "project posted");
                self.notify("Project Posted Successfully!");
                self.modal = None;
            }
            Action::DashboardAction => match self.session.role() {
                Some(Role::Student) => self.opportunities(&mut effects),
                Some(Role::Researcher) => self.modal = Some(Modal::PostProject),
                None => (),
            },
            Action::CloseModal => self.modal = None,
        }
        Ok(effects)
    }

    fn navigate(&mut self, name: &str, effects: &mut Vec<Effect>) {
        if self.router.navigate_to(name).is_some() {
            effects.push(Effect::ScrollToTop);
        }
    }

    fn opportunities(&mut self, effects: &mut Vec<Effect>) {
        self.navigate(View::Home.name(), effects);
        effects.push(Effect::ScrollToCatalog {
            after: CATALOG_SCROLL_DELAY,
        });
    }

    async fn confirm_application(&mut self, effects: &mut Vec<Effect>) -> StoreResult<()> {
        let Some(project) = self.current_project else {
            return Ok(());
        };
        self.modal = None;
        match self.session.apply(project).await? {
            ApplyOutcome::RequiresLogin => {
                self.error("Please login to apply!");
                self.navigate(View::Auth.name(), effects);
            }
            ApplyOutcome::Applied => self.notify("Application Sent Successfully!"),
            ApplyOutcome::AlreadyApplied => self.notify("You have already applied."),
        }
        Ok(())
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.show_toast(message.into(), false);
    }

    fn error(&mut self, message: impl Into<String>) {
        self.show_toast(message.into(), true);
    }

    fn show_toast(&mut self, message: String, is_error: bool) {
        self.toast = Some(Toast {
            message,
            is_error,
            shown_at: Instant::now(),
        });
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    #[cfg(test)]
    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        nav_links(self.session.identity())
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn auth_title(&self) -> &'static str {
        self.selected_role.welcome()
    }

    pub fn selected_role(&self) -> Role {
        self.selected_role
    }

    pub fn modal(&self) -> Option<Modal> {
        self.modal
    }

    /// The project whose details are open, if any.
    pub fn detail(&self) -> Option<&'static Project> {
        match self.modal {
            Some(Modal::ProjectDetail(id)) => catalog::find(id),
            _ => None,
        }
    }

    /// Catalog cards matching the current search term and category.
    pub fn catalog_cards(&self) -> Vec<Card<'static>> {
        cards(
            catalog::filter(&self.search, self.category),
            false,
            self.session.role(),
            self.session.applications(),
        )
    }

    pub fn dashboard(&self) -> Option<Dashboard<'_>> {
        self.session
            .identity()
            .map(|identity| dashboard::compose(identity, self.session.applications()))
    }

    /// The toast, unless it has been on screen for longer than the
    /// configured duration at `now`.
    pub fn toast_at(&self, now: Instant) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|t| now.saturating_duration_since(t.shown_at) < self.toast_duration)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Affordance;
    use crate::storage::{FileStore, MemoryStore};

    fn app() -> App<MemoryStore> {
        App::new(Session::new(MemoryStore::new()), Duration::from_secs(3))
    }

    async fn run(app: &mut App<MemoryStore>, action: Action) -> Vec<Effect> {
        app.dispatch(action).await.unwrap()
    }

    fn login(email: &str, role: Role) -> Action {
        Action::SubmitLogin {
            email: email.into(),
            role: Some(role),
        }
    }

    #[tokio::test]
    async fn test_login_goes_to_dashboard() {
        let mut app = app();
        let effects = run(&mut app, login("jane.doe@x.com", Role::Student)).await;
        assert_eq!(effects, vec![Effect::ScrollToTop]);
        assert_eq!(app.view(), View::Dashboard);
        assert_eq!(app.toast().unwrap().message, "Welcome back, Jane.doe!");
        assert_eq!(app.dashboard().unwrap().list_title, "My Applications");
        assert!(app.nav_links().contains(&NavLink::Logout));
    }

    #[tokio::test]
    async fn test_login_uses_selected_role() {
        let mut app = app();
        run(&mut app, Action::SelectRole(Role::Researcher)).await;
        assert_eq!(app.auth_title(), "Welcome Researcher");
        run(
            &mut app,
            Action::SubmitLogin {
                email: "silva@uni.lk".into(),
                role: None,
            },
        )
        .await;
        assert_eq!(app.identity().unwrap().role, Role::Researcher);
    }

    #[tokio::test]
    async fn test_empty_email_is_refused() {
        let mut app = app();
        run(&mut app, login("  ", Role::Student)).await;
        assert!(app.identity().is_none());
        assert!(app.toast().unwrap().is_error);
        assert_eq!(app.view(), View::Home);
    }

    #[tokio::test]
    async fn test_guest_confirm_forces_auth() {
        let mut app = app();
        run(&mut app, Action::OpenProjectDetail(ProjectId(5))).await;
        assert_eq!(app.detail().unwrap().title, "Smart Irrigation System");
        let effects = run(&mut app, Action::ConfirmApplication).await;
        assert_eq!(effects, vec![Effect::ScrollToTop]);
        assert_eq!(app.view(), View::Auth);
        assert_eq!(app.modal(), None);
        let toast = app.toast().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "Please login to apply!");
        assert!(app.session().applications().is_empty());
    }

    #[tokio::test]
    async fn test_apply_then_already_applied() {
        let mut app = app();
        run(&mut app, login("jane@x.com", Role::Student)).await;
        run(&mut app, Action::Navigate("home".into())).await;
        run(&mut app, Action::OpenProjectDetail(ProjectId(2))).await;
        run(&mut app, Action::ConfirmApplication).await;
        assert_eq!(app.toast().unwrap().message, "Application Sent Successfully!");
        let card = app
            .catalog_cards()
            .into_iter()
            .find(|c| c.project.id == ProjectId(2))
            .unwrap();
        assert_eq!(card.affordance, Affordance::Applied);
        run(&mut app, Action::OpenProjectDetail(ProjectId(2))).await;
        run(&mut app, Action::ConfirmApplication).await;
        assert_eq!(app.toast().unwrap().message, "You have already applied.");
        assert_eq!(app.session().applications().ids(), &[ProjectId(2)]);
    }

    #[tokio::test]
    async fn test_unknown_project_and_view_are_ignored() {
        let mut app = app();
        run(&mut app, Action::OpenProjectDetail(ProjectId(77))).await;
        assert_eq!(app.modal(), None);
        assert!(run(&mut app, Action::ConfirmApplication).await.is_empty());
        assert!(run(&mut app, Action::Navigate("profile".into())).await.is_empty());
        assert_eq!(app.view(), View::Home);
    }

    #[tokio::test]
    async fn test_search_and_category() {
        let mut app = app();
        run(&mut app, Action::Search("marine".into())).await;
        assert_eq!(app.catalog_cards().len(), 1);
        run(&mut app, Action::Search(String::new())).await;
        run(
            &mut app,
            Action::FilterCategory(Category::Only(Field::SocialScience)),
        )
        .await;
        assert_eq!(app.catalog_cards().len(), 2);
    }

    #[tokio::test]
    async fn test_logout_returns_home() {
        let mut app = app();
        run(&mut app, login("jane@x.com", Role::Student)).await;
        run(&mut app, Action::OpenProjectDetail(ProjectId(1))).await;
        run(&mut app, Action::ConfirmApplication).await;
        run(&mut app, Action::Logout).await;
        assert_eq!(app.view(), View::Home);
        assert!(app.dashboard().is_none());
        assert!(app.session().applications().is_empty());
        assert!(app.nav_links().contains(&NavLink::Login));
    }

    #[tokio::test]
    async fn test_dashboard_actions() {
        let mut app = app();
        run(&mut app, login("jane@x.com", Role::Student)).await;
        let effects = run(&mut app, Action::DashboardAction).await;
        assert_eq!(
            effects,
            vec![
                Effect::ScrollToTop,
                Effect::ScrollToCatalog {
                    after: CATALOG_SCROLL_DELAY
                }
            ]
        );
        assert_eq!(app.view(), View::Home);

        run(&mut app, Action::Logout).await;
        run(&mut app, login("silva@uni.lk", Role::Researcher)).await;
        run(&mut app, Action::DashboardAction).await;
        assert_eq!(app.modal(), Some(Modal::PostProject));
        run(
            &mut app,
            Action::SubmitNewProject(NewProject {
                title: "Mangrove Carbon Stocks".into(),
                field: Field::Biology,
                description: String::new(),
            }),
        )
        .await;
        assert_eq!(app.modal(), None);
        assert_eq!(app.toast().unwrap().message, "Project Posted Successfully!");
    }

    #[tokio::test]
    async fn test_untitled_project_is_posted() {
        let mut app = app();
        run(&mut app, login("silva@uni.lk", Role::Researcher)).await;
        run(&mut app, Action::OpenPostProject).await;
        run(
            &mut app,
            Action::SubmitNewProject(NewProject {
                title: String::new(),
                field: Field::It,
                description: String::new(),
            }),
        )
        .await;
        assert_eq!(app.modal(), None);
        let toast = app.toast().unwrap();
        assert!(!toast.is_error);
        assert_eq!(toast.message, "Project Posted Successfully!");
    }

    #[tokio::test]
    async fn test_storage_failure_becomes_error_toast() {
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state");
        let mut app = App::new(Session::new(FileStore::new(&state)), Duration::from_secs(3));
        assert!(!app.handle(login("jane@x.com", Role::Student)).await.is_empty());
        std::fs::remove_dir_all(&state).unwrap();
        std::fs::write(&state, "").unwrap();

        app.handle(Action::OpenProjectDetail(ProjectId(1))).await;
        assert!(app.handle(Action::ConfirmApplication).await.is_empty());
        assert!(app.toast().unwrap().is_error);
        assert!(app.session().applications().is_empty());
        assert_eq!(app.view(), View::Dashboard);
    }

    #[tokio::test]
    async fn test_toast_expires() {
        let mut app = App::new(Session::new(MemoryStore::new()), Duration::from_millis(50));
        run(&mut app, Action::Logout).await;
        let shown_at = app.toast.as_ref().unwrap().shown_at;
        assert!(app.toast_at(shown_at).is_some());
        assert!(app.toast_at(shown_at + Duration::from_millis(49)).is_some());
        assert!(app.toast_at(shown_at + Duration::from_millis(50)).is_none());
    }
}
