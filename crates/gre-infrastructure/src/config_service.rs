//! Configuration service.
//!
//! Loads [`DashboardConfig`] from `config.toml` and applies environment
//! overrides. A missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use gre_core::Result;
use gre_core::config::DashboardConfig;

pub const LOGIN_API_URL_ENV: &str = "LOGIN_API_URL";
pub const BUSINESS_IDENTIFIER_ENV: &str = "BUSINESS_IDENTIFIER";
pub const API_BASE_URL_ENV: &str = "GRE_API_BASE_URL";
pub const PROJECT_ID_ENV: &str = "GRE_PROJECT_ID";

/// Loads and caches the dashboard configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<DashboardConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<DashboardConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let mut loaded = load_config_file(&self.path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Reads a TOML config file; missing or blank files give the defaults.
pub fn load_config_file(path: &Path) -> Result<DashboardConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(DashboardConfig::default());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }

    let config: DashboardConfig = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Applies environment overrides; `lookup` returns the variable's value.
pub fn apply_env_overrides<F>(config: &mut DashboardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = get(LOGIN_API_URL_ENV) {
        config.login_url = url;
    }
    if let Some(identifier) = get(BUSINESS_IDENTIFIER_ENV) {
        config.business_identifier = identifier;
    }
    if let Some(base) = get(API_BASE_URL_ENV) {
        config.api_base_url = base.trim_end_matches('/').to_string();
    }
    if let Some(project) = get(PROJECT_ID_ENV) {
        config.project_id = project;
    }
}
