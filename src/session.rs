use crate::model::{ApplicationSet, Identity, ProjectId, Role};
use crate::storage::{KeyValueStore, StoreResult};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

pub const USER_KEY: &str = "research_rover_user";
pub const APPLICATIONS_KEY: &str = "research_rover_apps";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    AlreadyApplied,
    RequiresLogin,
}

/// The current user, if any, and the projects they applied to. Every change
/// is written through to the store.
pub struct Session<S> {
    store: S,
    identity: Option<Identity>,
    applications: ApplicationSet,
}

impl<S: KeyValueStore> Session<S> {
    /// A guest session. Use [`Session::restore`] to pick up a saved one.
    pub fn new(store: S) -> Session<S> {
        Session {
            store,
            identity: None,
            applications: ApplicationSet::new(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    pub fn applications(&self) -> &ApplicationSet {
        &self.applications
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mock login: no password, no check on the address. The new identity
    /// starts with no applications, whoever was logged in before.
    #[instrument(skip_all, fields(role = %role))]
    pub async fn login(&mut self, email: &str, role: Role) -> StoreResult<Identity> {
        let identity = Identity::from_email(email, role);
        self.applications.clear();
        self.store.remove(APPLICATIONS_KEY).await?;
        self.store
            .set(USER_KEY, &serde_json::to_string(&identity)?)
            .await?;
        info!(name = %identity.name, "logged in");
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    pub async fn logout(&mut self) -> StoreResult<()> {
        self.identity = None;
        self.applications.clear();
        self.store.remove(USER_KEY).await?;
        self.store.remove(APPLICATIONS_KEY).await?;
        debug!("session cleared");
        Ok(())
    }

    /// Reload the saved session. Unparsable saved data counts as no data.
    pub async fn restore(&mut self) -> StoreResult<Option<&Identity>> {
        self.identity = self.load(USER_KEY).await?;
        self.applications = if self.identity.is_some() {
            self.load(APPLICATIONS_KEY).await?.unwrap_or_default()
        } else {
            ApplicationSet::new()
        };
        if let Some(identity) = &self.identity {
            info!(
                name = %identity.name,
                applications = self.applications.len(),
                "session restored"
            );
        }
        Ok(self.identity.as_ref())
    }

    #[instrument(skip(self))]
    pub async fn apply(&mut self, project: ProjectId) -> StoreResult<ApplyOutcome> {
        if self.identity.is_none() {
            return Ok(ApplyOutcome::RequiresLogin);
        }
        let mut applications = self.applications.clone();
        if !applications.insert(project) {
            return Ok(ApplyOutcome::AlreadyApplied);
        }
        // Only keep the application once it has been saved.
        self.store
            .set(APPLICATIONS_KEY, &serde_json::to_string(&applications)?)
            .await?;
        self.applications = applications;
        info!("application recorded");
        Ok(ApplyOutcome::Applied)
    }

    async fn load<T: DeserializeOwned>(&mut self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed saved value");
                Ok(None)
            }
        }
    }
}
