//! Application layer for the GRE dashboard.
//!
//! Use cases here coordinate the session store, the remote APIs and the
//! timers (search debounce, live-session refresh) that drive the views.

pub mod auth_usecase;
pub mod customer_browser;
pub mod debounce;
pub mod session_poller;

#[cfg(test)]
mod testing;

pub use auth_usecase::AuthUseCase;
pub use customer_browser::CustomerBrowser;
pub use debounce::Debouncer;
pub use session_poller::{ActiveSessionPoller, Connectivity};
