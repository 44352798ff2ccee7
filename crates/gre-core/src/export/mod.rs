//! Tabular export of an already-filtered customer list.
//!
//! Nothing here re-filters: callers pass exactly the records they want
//! exported.

mod file_name;
mod mask;
mod rows;

pub use file_name::{EXPORT_EXTENSION, ExportOptions, generate_file_name};
pub use mask::{mask_email, mask_phone};
pub use rows::{ExportRow, GreExportRow};

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::customer::Customer;
use crate::error::{GreError, Result};

pub const NO_DATA_MESSAGE: &str =
    "No data to export. Please adjust your filters or search terms.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportKind {
    #[default]
    Full,
    /// Masked contact details for the GRE desk.
    Gre,
}

impl ExportKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ExportKind::Full => "customers_export",
            ExportKind::Gre => "gre_customers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportRows {
    Full(Vec<ExportRow>),
    Gre(Vec<GreExportRow>),
}

impl ExportRows {
    pub fn len(&self) -> usize {
        match self {
            ExportRows::Full(rows) => rows.len(),
            ExportRows::Gre(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, ready-to-write export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub rows: ExportRows,
}

impl ExportFile {
    /// One header line of column titles, then one line per row.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        match &self.rows {
            ExportRows::Full(rows) => rows.iter().try_for_each(|row| writer.serialize(row))?,
            ExportRows::Gre(rows) => rows.iter().try_for_each(|row| writer.serialize(row))?,
        }
        writer
            .into_inner()
            .map_err(|e| GreError::internal(format!("Failed to flush export: {}", e.error())))
    }
}

/// Builds rows and a file name; an empty record set is an error.
pub fn build_export(
    kind: ExportKind,
    customers: &[Customer],
    options: &ExportOptions,
    now: DateTime<FixedOffset>,
) -> Result<ExportFile> {
    if customers.is_empty() {
        return Err(GreError::validation(NO_DATA_MESSAGE));
    }

    let offset = *now.offset();
    let rows = match kind {
        ExportKind::Full => ExportRows::Full(
            customers
                .iter()
                .map(|c| ExportRow::from_customer(c, offset))
                .collect(),
        ),
        ExportKind::Gre => ExportRows::Gre(customers.iter().map(GreExportRow::from_customer).collect()),
    };

    let file_name = generate_file_name(options, kind.prefix(), now);
    tracing::info!(file_name = %file_name, rows = rows.len(), "Prepared export");

    Ok(ExportFile { file_name, rows })
}
