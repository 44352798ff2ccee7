pub mod api;
pub mod auth;
pub mod config;
pub mod customer;
pub mod decode;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod polling;
pub mod route;
pub mod sales_person;
pub mod session;
pub mod time;

// Re-export common error type
pub use error::{ErrorKind, GreError, Result};
