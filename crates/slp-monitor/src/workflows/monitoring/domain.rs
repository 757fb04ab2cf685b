use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for site-visit records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitId(pub String);

/// Identifier wrapper for monitored enterprise projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Canonical identifier for an association record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssociationId(pub String);

/// Identifier wrapper for caretaker records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaretakerId(pub String);

/// Lifecycle states a tracked site visit moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VisitStatus::Scheduled => "Scheduled",
            VisitStatus::InProgress => "In Progress",
            VisitStatus::Completed => "Completed",
            VisitStatus::Cancelled => "Cancelled",
        }
    }
}

/// Caretaker reference captured on a visit at write time (snapshot, not a live join).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaretakerRef {
    #[serde(default)]
    pub id: Option<CaretakerId>,
    pub name: String,
}

/// One monitoring visit event for a project/association pair.
///
/// `visit_date` stays optional because loose field-log sources carry dates the
/// importer cannot always parse; an absent date marks the visit as maximally
/// stale instead of poisoning the batch it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteVisit {
    pub id: VisitId,
    pub project_id: ProjectId,
    pub association_name: String,
    pub visit_number: u8,
    #[serde(default)]
    pub visit_date: Option<NaiveDate>,
    pub status: VisitStatus,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub caretakers: Vec<CaretakerRef>,
}

/// Association (cooperative) attached to a monitored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: AssociationId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "no_active_members")]
    pub active_members: Option<u32>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

/// Monitored enterprise carrying the canonical association set for its site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub associations: Vec<Association>,
}

/// Program caretaker, joined to an association by free-text label only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caretaker {
    pub id: CaretakerId,
    pub name: String,
    #[serde(default, alias = "slpAssociation")]
    pub slp_association: Option<String>,
    #[serde(default, alias = "associationName")]
    pub association_name: Option<String>,
}

impl Caretaker {
    /// The label to reconcile against, preferring `slp_association` over the
    /// legacy `association_name` field. `None` when both are missing or blank.
    pub fn association_label(&self) -> Option<&str> {
        self.slp_association
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .or_else(|| {
                self.association_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
            })
    }
}
