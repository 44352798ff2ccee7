//! Dashboard configuration model.
//!
//! Every field has a default matching the production deployment, so an empty
//! or missing `config.toml` yields a working configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::time::{IST_OFFSET_MINUTES, offset_from_minutes};

pub const DEFAULT_API_BASE_URL: &str = "https://api.floorselector.convrse.ai";
pub const DEFAULT_LOGIN_URL: &str = "https://api.floorselector.convrse.ai/api/sales-person/login";
pub const DEFAULT_BUSINESS_IDENTIFIER: &str = "krisala";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub login_url: String,
    /// Project segment used in every data endpoint.
    pub project_id: String,
    pub business_identifier: String,
    pub app_version: String,
    pub platform: String,
    /// Hard timeout for the live-session request.
    pub request_timeout_secs: u64,
    /// Offset used for "today" and for timestamps that carry no offset.
    pub timezone_offset_minutes: i32,
    pub polling: PollingSettings,
    pub search: SearchSettings,
    pub auth: AuthSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            project_id: DEFAULT_BUSINESS_IDENTIFIER.to_string(),
            business_identifier: DEFAULT_BUSINESS_IDENTIFIER.to_string(),
            app_version: "1.0.0".to_string(),
            platform: "web".to_string(),
            request_timeout_secs: 10,
            timezone_offset_minutes: IST_OFFSET_MINUTES,
            polling: PollingSettings::default(),
            search: SearchSettings::default(),
            auth: AuthSettings::default(),
        }
    }
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn timezone(&self) -> chrono::FixedOffset {
        offset_from_minutes(self.timezone_offset_minutes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollingSettings {
    pub base_interval_secs: u64,
    pub max_backoff_secs: u64,
    pub offline_interval_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            base_interval_secs: 30,
            max_backoff_secs: 300,
            offline_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub default_page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            default_page_size: 30,
        }
    }
}

impl SearchSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Front-end password that stands in for an upstream credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialAlias {
    pub email: String,
    pub frontend_password: String,
    pub backend_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthSettings {
    /// Full names permitted past the login gateway.
    pub allowed_full_names: Vec<String>,
    pub credential_aliases: Vec<CredentialAlias>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        let alias = |email: &str, frontend: &str, backend: &str| CredentialAlias {
            email: email.to_string(),
            frontend_password: frontend.to_string(),
            backend_password: backend.to_string(),
        };

        Self {
            allowed_full_names: vec![
                "Mohini Jadhav".to_string(),
                "Shivam Shelke".to_string(),
                "Rakhi Sangwan".to_string(),
            ],
            credential_aliases: vec![
                alias("chetan@krisala.com", "chetan@krisala123", "chetandhadiwal491"),
                alias("anurag@krisala.com", "anurag@krisala123", "anuraggoyal491"),
                alias(
                    "ujjawala.41@krisala.com",
                    "ujjawala@krisala123",
                    "ujjawalabedmutha491",
                ),
            ],
        }
    }
}
