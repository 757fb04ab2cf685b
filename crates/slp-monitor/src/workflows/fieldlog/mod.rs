//! Field-log CSV ingestion.
//!
//! Monitoring teams submit visit histories as spreadsheet exports ("field
//! logs"). Rows are best-effort: unparseable dates and unknown statuses
//! degrade with a warning instead of failing the batch, because one sloppy
//! row must not block the ranking of unrelated projects.

mod parser;

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::workflows::monitoring::domain::SiteVisit;

/// Failures raised while ingesting a field-log export. Structural problems
/// only; per-row data quality issues degrade instead.
#[derive(Debug, Error)]
pub enum FieldLogImportError {
    #[error("failed to read field log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid field log data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct FieldLogImporter;

impl FieldLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SiteVisit>, FieldLogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SiteVisit>, FieldLogImportError> {
        parser::parse_visits(reader)
    }
}
