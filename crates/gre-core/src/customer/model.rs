use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::decode::{lenient_bool, lenient_opt_string, lenient_string, string_list};
use crate::format::{to_number, to_number_opt};
use crate::time::parse_timestamp;

/// A customer lead as returned by the customer API.
///
/// Only the fields the dashboard reads are typed; everything else is kept in
/// `extra` so an update round trip never drops data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    pub record_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(
        rename = "salesPerson",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sales_person: Option<String>,
    /// Numeric or string; read through [`Customer::effective_budget`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Value>,
    #[serde(
        rename = "nextMeetingDate",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_meeting_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Value>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_id: String,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,

    #[serde(
        rename = "buying_purpose_19a51b85",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub buying_purpose: Option<String>,
    #[serde(
        rename = "location__ac1e6456",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        rename = "budget_interested_c49",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub budget_interested: Option<Value>,
    #[serde(
        rename = "preferrences_563",
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub preferences: Vec<String>,
    #[serde(
        default,
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub source_tags: Vec<String>,
    #[serde(
        rename = "closing_manager_cb3",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub closing_manager: Option<String>,
    /// A single date string, an array of them, or absent.
    #[serde(
        rename = "visit_date_ed0",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub visit_date: Option<Value>,
    #[serde(
        rename = "project_visited_b2b",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_visited: Option<String>,
    #[serde(
        rename = "gre_attended_282",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gre_attended: Option<String>,
    #[serde(
        rename = "visited_with_95e",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub visited_with: Option<String>,
    #[serde(
        rename = "site_visit_type_703",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub site_visit_type: Option<String>,
    #[serde(
        rename = "visit_comments_462",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub visit_comments: Option<String>,
    #[serde(
        rename = "remark_9b8",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub remark: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub remarks: Option<String>,
    #[serde(
        rename = "channelPartner",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_partner: Option<String>,
    #[serde(
        rename = "channel_partner_0f8",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub channel_partner_firm: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sourcing_manager: Option<String>,
    #[serde(
        rename = "cp_contact_number_67b",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cp_contact_number: Option<String>,
    #[serde(
        rename = "channel_partner_representative_637",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cp_representative: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    /// Public id, falling back to the storage id.
    pub fn display_id(&self) -> &str {
        if self.id.is_empty() {
            &self.record_id
        } else {
            &self.id
        }
    }

    /// True for either the public id or the store id.
    pub fn has_id(&self, id: &str) -> bool {
        !id.is_empty() && (self.display_id() == id || self.record_id == id)
    }

    /// Budget as a number; a missing or zero `budget` defers to the
    /// interested-budget field.
    pub fn effective_budget(&self) -> f64 {
        let budget = to_number_opt(self.budget.as_ref());
        if budget != 0.0 {
            return budget;
        }
        self.budget_interested.as_ref().map(to_number).unwrap_or(0.0)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }

    pub fn created_at_in(&self, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.created_at, offset)
    }

    /// Valid visit dates, newest first.
    pub fn visit_dates(&self, offset: FixedOffset) -> Vec<DateTime<FixedOffset>> {
        let raw: Vec<&str> = match &self.visit_date {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };

        let mut dates: Vec<_> = raw
            .into_iter()
            .filter_map(|s| parse_timestamp(s, offset))
            .collect();
        dates.sort_by(|a, b| b.cmp(a));
        dates
    }

    /// Latest visit as `Mon D, YYYY`, or `None` when there is no valid date.
    pub fn most_recent_visit(&self, offset: FixedOffset) -> Option<String> {
        self.visit_dates(offset)
            .first()
            .map(|dt| dt.format("%b %-d, %Y").to_string())
    }

    /// `remark` and `remarks` joined with ` | `.
    pub fn combined_remarks(&self) -> String {
        [self.remark.as_deref(), self.remarks.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn channel_partner_name(&self) -> Option<&str> {
        self.channel_partner
            .as_deref()
            .or(self.channel_partner_firm.as_deref())
    }
}

/// Partial update body for `PUT /customer/<project>/<id>`.
///
/// Keys are sent verbatim, so API field names (`remark_9b8`, `salesPerson`)
/// are used as is.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct CustomerPatch {
    fields: Map<String, Value>,
}

impl CustomerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
