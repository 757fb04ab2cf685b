use thiserror::Error;

use super::domain::{Caretaker, Project, SiteVisit};

/// Read-only provider of the three record collections consumed per
/// invocation. Implementations live outside the engine; nothing downstream
/// mutates what they return.
pub trait RecordSource: Send + Sync {
    fn site_visits(&self) -> Result<Vec<SiteVisit>, SourceError>;
    fn projects(&self) -> Result<Vec<Project>, SourceError>;
    fn caretakers(&self) -> Result<Vec<Caretaker>, SourceError>;
}

/// Error enumeration for record source failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}
