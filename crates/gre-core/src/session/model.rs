use serde::{Deserialize, Serialize};

use crate::decode::{lenient_bool, lenient_opt_string, lenient_string};

/// A sales session currently reported active by the remote system.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sales_person_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sales_person_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<String>,
}
