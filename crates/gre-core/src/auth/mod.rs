//! Authentication: identity model, persisted session store and login gateway.

pub mod gateway;
pub mod model;
pub mod storage;
pub mod store;

pub use gateway::{ClientContext, LoginGateway};
pub use model::{LoginRequest, LoginSession, UserData};
pub use storage::{LocalStorage, MemoryStorage};
pub use store::{AuthState, GuardDecision, SessionStore};
