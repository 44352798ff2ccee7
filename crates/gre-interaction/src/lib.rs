pub mod dashboard_client;
mod http;
pub mod login_client;

pub use dashboard_client::DashboardApiClient;
pub use login_client::RemoteLoginClient;
