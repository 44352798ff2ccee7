//! Identity and login wire models.

use serde::{Deserialize, Serialize};

/// Permission that unlocks manager-only views.
pub const SALES_MANAGER_PERMISSION: &str = "sales_manager";

/// Authenticated identity as returned by the login API and persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserData {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl UserData {
    pub fn is_sales_manager(&self) -> bool {
        self.permissions
            .iter()
            .any(|permission| permission == SALES_MANAGER_PERMISSION)
    }
}

/// Credentials as typed into the login form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceInfo {
    pub user_agent: String,
    pub platform: String,
    pub app_version: String,
    pub system_version: String,
    pub network_type: String,
    pub screen_resolution: String,
    pub device_model: String,
}

/// Body posted to the upstream login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    pub business_identifier: String,
    pub remember_me: bool,
    pub device_info: DeviceInfo,
    pub device_id: String,
    pub session_id: String,
    pub ip_address: String,
    pub platform: String,
    pub app_version: String,
    pub system_version: String,
    pub network_type: String,
    pub screen_resolution: String,
    pub device_model: String,
    pub silent_relogin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenData {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginData {
    #[serde(rename = "salesPerson")]
    pub sales_person: UserData,
    pub token: TokenData,
}

/// Upstream login response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<LoginData>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Status plus decoded body of an upstream login call.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginApiResponse {
    pub status: u16,
    pub body: LoginResponse,
}

impl LoginApiResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Identity and token of a successful, authorized login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSession {
    pub user: UserData,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parses_nested_identity() {
        let json = r#"{
            "success": true,
            "data": {
                "salesPerson": {
                    "user_id": "u1",
                    "email": "mohini@krisala.com",
                    "full_name": "Mohini Jadhav",
                    "permissions": ["sales_manager"]
                },
                "token": { "access_token": "tok" }
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.sales_person.full_name, "Mohini Jadhav");
        assert!(data.sales_person.is_sales_manager());
        assert_eq!(data.token.access_token, "tok");
    }

    #[test]
    fn test_missing_permissions_default_to_empty() {
        let user: UserData =
            serde_json::from_str(r#"{"user_id":"u","email":"e","full_name":"n"}"#).unwrap();
        assert!(user.permissions.is_empty());
        assert!(!user.is_sales_manager());
    }
}
