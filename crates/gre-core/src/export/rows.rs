use chrono::FixedOffset;
use serde::Serialize;
use serde_json::Value;

use super::mask::{mask_email, mask_phone};
use crate::customer::Customer;
use crate::time::parse_timestamp;

/// Full customer export row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Sales Person")]
    pub sales_person: String,
    /// Kept as received: a number stays a number, a string stays a string.
    #[serde(rename = "Budget Interested")]
    pub budget_interested: Value,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Created Date")]
    pub created_date: String,
    #[serde(rename = "Updated Date")]
    pub updated_date: String,
    #[serde(rename = "Buying Purpose")]
    pub buying_purpose: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Preferences")]
    pub preferences: String,
    #[serde(rename = "Source Tags")]
    pub source_tags: String,
    #[serde(rename = "Closing Manager")]
    pub closing_manager: String,
    #[serde(rename = "Last Visit Date")]
    pub last_visit_date: String,
    #[serde(rename = "Project Visited")]
    pub project_visited: String,
    #[serde(rename = "GRE Attended")]
    pub gre_attended: String,
    #[serde(rename = "Visited With")]
    pub visited_with: String,
    #[serde(rename = "Visit Mode")]
    pub visit_mode: String,
    #[serde(rename = "Visit Comments")]
    pub visit_comments: String,
    #[serde(rename = "Remarks")]
    pub remarks: String,
    #[serde(rename = "Channel Partner Name")]
    pub channel_partner_name: String,
}

/// Masked row for the GRE desk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreExportRow {
    #[serde(rename = "Client Name")]
    pub client_name: String,
    #[serde(rename = "Contact (Masked)")]
    pub contact: String,
    #[serde(rename = "Email (Masked)")]
    pub email: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "CP Firm Name")]
    pub cp_firm_name: String,
    #[serde(rename = "Booking For")]
    pub booking_for: String,
    #[serde(rename = "Executive Name")]
    pub executive_name: String,
    #[serde(rename = "Executive Number")]
    pub executive_number: String,
    #[serde(rename = "Sourcing Manager")]
    pub sourcing_manager: String,
    #[serde(rename = "Closing Manager")]
    pub closing_manager: String,
    #[serde(rename = "PAX")]
    pub pax: String,
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// `M/D/YYYY`, or empty when the timestamp does not parse.
fn short_date(raw: &str, offset: FixedOffset) -> String {
    parse_timestamp(raw, offset)
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

impl ExportRow {
    pub fn from_customer(customer: &Customer, offset: FixedOffset) -> Self {
        let budget_interested = match &customer.budget {
            Some(value @ (Value::Number(_) | Value::String(_))) => value.clone(),
            _ => Value::String(String::new()),
        };

        Self {
            customer_id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            sales_person: text(&customer.sales_person),
            budget_interested,
            status: customer.status_label().to_string(),
            created_date: short_date(&customer.created_at, offset),
            updated_date: customer
                .updated_at
                .as_deref()
                .map(|raw| short_date(raw, offset))
                .unwrap_or_default(),
            buying_purpose: text(&customer.buying_purpose),
            location: text(&customer.location),
            preferences: customer.preferences.join(", "),
            source_tags: customer.source_tags.join(", "),
            closing_manager: text(&customer.closing_manager),
            last_visit_date: customer.most_recent_visit(offset).unwrap_or_default(),
            project_visited: text(&customer.project_visited),
            gre_attended: text(&customer.gre_attended),
            visited_with: text(&customer.visited_with),
            visit_mode: text(&customer.site_visit_type),
            visit_comments: text(&customer.visit_comments),
            remarks: customer.combined_remarks(),
            channel_partner_name: customer.channel_partner_name().unwrap_or_default().to_string(),
        }
    }
}

impl GreExportRow {
    pub fn from_customer(customer: &Customer) -> Self {
        let source = if !customer.source_tags.is_empty() {
            customer.source_tags.join(", ")
        } else if customer.channel_partner.is_some() {
            "Channel Partner".to_string()
        } else {
            "Direct".to_string()
        };

        let executive_name = customer
            .cp_representative
            .as_deref()
            .or(customer.sourcing_manager.as_deref())
            .or(customer.sales_person.as_deref())
            .unwrap_or_default()
            .to_string();

        Self {
            client_name: customer.name.clone(),
            contact: mask_phone(&customer.phone),
            email: mask_email(&customer.email),
            source,
            cp_firm_name: customer.channel_partner_name().unwrap_or_default().to_string(),
            booking_for: customer.preferences.join(", "),
            executive_name,
            executive_number: text(&customer.cp_contact_number),
            sourcing_manager: text(&customer.sourcing_manager),
            closing_manager: text(&customer.closing_manager),
            pax: text(&customer.visited_with),
        }
    }
}
