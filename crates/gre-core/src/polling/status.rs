use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ErrorKind, GreError};
use crate::session::ActiveSession;

pub const OFFLINE_MESSAGE: &str =
    "You are offline. Data will refresh when connection is restored.";

/// Where the poller is in its fetch/wait cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollPhase {
    Idle,
    /// Fetch in flight. `foreground` is true for the initial load and manual
    /// refreshes, which show a blocking indicator.
    Fetching { foreground: bool },
    Scheduled,
    Stopped,
}

/// Failure classes the poller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    Timeout,
    Network,
    Server,
    Auth,
    Unknown,
}

impl From<&GreError> for FailureClass {
    fn from(err: &GreError) -> Self {
        match err.kind() {
            ErrorKind::Timeout => FailureClass::Timeout,
            ErrorKind::Network => FailureClass::Network,
            ErrorKind::Server => FailureClass::Server,
            ErrorKind::Auth => FailureClass::Auth,
            _ => FailureClass::Unknown,
        }
    }
}

/// Everything a view needs to render the live-session screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollSnapshot {
    pub phase: PollPhase,
    pub failures: u32,
    pub online: bool,
    /// Seconds until the next scheduled refresh.
    pub countdown_secs: u64,
    pub error: Option<String>,
    pub last_failure: Option<FailureClass>,
    pub last_updated: Option<DateTime<Utc>>,
    pub search_term: String,
    pub sessions: Vec<ActiveSession>,
    /// `sessions` with `search_term` applied.
    pub filtered: Vec<ActiveSession>,
}

impl Default for PollSnapshot {
    fn default() -> Self {
        Self {
            phase: PollPhase::Idle,
            failures: 0,
            online: true,
            countdown_secs: 0,
            error: None,
            last_failure: None,
            last_updated: None,
            search_term: String::new(),
            sessions: Vec::new(),
            filtered: Vec::new(),
        }
    }
}

impl PollSnapshot {
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, PollPhase::Fetching { foreground: true })
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self.phase, PollPhase::Fetching { foreground: false })
    }
}
