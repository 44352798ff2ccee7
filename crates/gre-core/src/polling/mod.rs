//! Refresh policy and observable state of the active-session poller.

mod backoff;
mod status;

pub use backoff::RefreshPolicy;
pub use status::{FailureClass, OFFLINE_MESSAGE, PollPhase, PollSnapshot};
