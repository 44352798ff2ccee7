use std::sync::Arc;

use anyhow::{Context, Result, bail};
use gre_core::auth::{GuardDecision, SessionStore, UserData};
use gre_core::config::DashboardConfig;
use gre_infrastructure::{ConfigService, FileLocalStorage, GrePaths};
use gre_interaction::{DashboardApiClient, RemoteLoginClient};

/// Services shared by every command.
pub struct AppContext {
    pub paths: GrePaths,
    pub config: DashboardConfig,
    pub session: Arc<SessionStore>,
    pub dashboard: Arc<DashboardApiClient>,
    pub login: Arc<RemoteLoginClient>,
}

impl AppContext {
    pub fn bootstrap(paths: GrePaths) -> Result<Self> {
        let config = ConfigService::new(paths.config_file())
            .get_config()
            .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;
        tracing::debug!(
            api = %config.api_base_url,
            project = %config.project_id,
            "Configuration loaded"
        );

        let storage = Arc::new(FileLocalStorage::new(paths.storage_file()));
        let session = Arc::new(SessionStore::new(storage));
        session.check_auth();

        Ok(Self {
            dashboard: Arc::new(DashboardApiClient::new(&config)),
            login: Arc::new(RemoteLoginClient::new(&config)),
            paths,
            config,
            session,
        })
    }

    /// Route guard for every command except `login`.
    pub fn require_user(&self) -> Result<UserData> {
        match self.session.guard() {
            GuardDecision::Allow(user) => Ok(user),
            GuardDecision::Redirect(route) => {
                tracing::debug!(route = %route.path(), "Guard redirected");
                bail!("Not logged in. Run `gre login` first.")
            }
            GuardDecision::Loading => bail!("Session is still loading"),
        }
    }
}
