//! Sales people assigned to the project.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode::{array_or_data, decode_items, lenient_opt_string, lenient_string};
use crate::filter::Searchable;
use crate::route::{Route, slugify};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesPerson {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub project: Option<String>,
}

impl SalesPerson {
    pub fn route(&self) -> Route {
        Route::SalesPerson {
            slug: slugify(&self.name),
        }
    }
}

impl Searchable for SalesPerson {
    fn search_fields(&self) -> Vec<&str> {
        [
            Some(self.name.as_str()),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.project.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Decodes a sales-people body (bare array or `{data: [...]}`).
pub fn decode_sales_people(body: Value) -> Vec<SalesPerson> {
    decode_items(array_or_data(body, "sales_person"), "sales_person")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::search;
    use serde_json::json;

    #[test]
    fn test_decode_both_envelopes() {
        let bare = decode_sales_people(json!([{"name": "Rakhi Sangwan", "phone": 98765}]));
        assert_eq!(bare[0].phone.as_deref(), Some("98765"));

        let wrapped = decode_sales_people(json!({"data": [{"name": "A"}, {"name": "B"}]}));
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].email, None);
    }

    #[test]
    fn test_search_and_route() {
        let people = decode_sales_people(json!([
            {"name": "Rakhi Sangwan", "email": "rakhi@krisala.com"},
            {"name": "Shivam Shelke", "project": "Krisala 41"}
        ]));
        assert_eq!(search(&people, "krisala 41")[0].name, "Shivam Shelke");
        assert_eq!(search(&people, "RAKHI@").len(), 1);
        assert_eq!(people[0].route().path(), "/dashboard/sales-people/rakhi-sangwan");
    }
}
