use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use slp_monitor::workflows::fieldlog::{FieldLogImportError, FieldLogImporter};
use slp_monitor::workflows::monitoring::{
    Association, AssociationId, Caretaker, CaretakerId, CaretakerRef, Project, ProjectId,
    RankingFilter, RecordSource, SiteVisit, SourceError, VisitId, VisitStatus,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Static record source backing the service and the CLI demos. Records are
/// fixed at construction; every read hands out a fresh copy.
#[derive(Clone)]
pub(crate) struct InMemoryRecordSource {
    pub(crate) visits: Vec<SiteVisit>,
    pub(crate) projects: Vec<Project>,
    pub(crate) caretakers: Vec<Caretaker>,
}

impl RecordSource for InMemoryRecordSource {
    fn site_visits(&self) -> Result<Vec<SiteVisit>, SourceError> {
        Ok(self.visits.clone())
    }

    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        Ok(self.projects.clone())
    }

    fn caretakers(&self) -> Result<Vec<Caretaker>, SourceError> {
        Ok(self.caretakers.clone())
    }
}

impl InMemoryRecordSource {
    /// Seed records for a small monitoring cohort. Visit dates are derived
    /// from `reference` so relative ages, and with them the demo scores,
    /// stay the same at any wall-clock date.
    pub(crate) fn seeded(reference: NaiveDate) -> Self {
        Self {
            visits: seeded_visits(reference),
            projects: seeded_projects(),
            caretakers: seeded_caretakers(),
        }
    }

    /// Visits come from the export; canonical project and caretaker records
    /// stay on the seeded catalog, so rows enrich only where the export
    /// labels reconcile against it.
    pub(crate) fn from_field_log(path: &Path) -> Result<Self, FieldLogImportError> {
        Ok(Self {
            visits: FieldLogImporter::from_path(path)?,
            projects: seeded_projects(),
            caretakers: seeded_caretakers(),
        })
    }
}

fn days_before(reference: NaiveDate, days: i64) -> Option<NaiveDate> {
    reference.checked_sub_signed(chrono::Duration::days(days))
}

fn seeded_visit(
    id: &str,
    project_id: &str,
    association: &str,
    visit_number: u8,
    visit_date: Option<NaiveDate>,
    status: VisitStatus,
    findings: &str,
) -> SiteVisit {
    SiteVisit {
        id: VisitId(id.to_string()),
        project_id: ProjectId(project_id.to_string()),
        association_name: association.to_string(),
        visit_number,
        visit_date,
        status,
        findings: findings.to_string(),
        caretakers: Vec::new(),
    }
}

fn with_caretakers(mut visit: SiteVisit, names: &[&str]) -> SiteVisit {
    visit.caretakers = names
        .iter()
        .map(|name| CaretakerRef {
            id: None,
            name: name.to_string(),
        })
        .collect();
    visit
}

fn seeded_visits(reference: NaiveDate) -> Vec<SiteVisit> {
    vec![
        seeded_visit(
            "SV-1001",
            "P-2024-011",
            "San Isidro Farmers Association",
            1,
            days_before(reference, 150),
            VisitStatus::Completed,
            "Land preparation verified ahead of planting.",
        ),
        seeded_visit(
            "SV-1002",
            "P-2024-011",
            "San Isidro Farmers Association",
            2,
            days_before(reference, 95),
            VisitStatus::Completed,
            "Transplanting done on 2.5 hectares.",
        ),
        seeded_visit(
            "SV-1003",
            "P-2024-011",
            "San Isidro Farmers Association",
            3,
            days_before(reference, 52),
            VisitStatus::Completed,
            "Weeding and fertilizer application on schedule.",
        ),
        with_caretakers(
            seeded_visit(
                "SV-1004",
                "P-2024-011",
                "San Isidro Farmers Association",
                4,
                days_before(reference, 24),
                VisitStatus::Completed,
                "Harvest completed across all plots; palay dried and bagged for the cooperative buyers.",
            ),
            &["Elena Reyes"],
        ),
        seeded_visit(
            "SV-2001",
            "P-2024-027",
            "Association of Malaya Hog Raisers",
            1,
            days_before(reference, 140),
            VisitStatus::Completed,
            "Pens built to program standard.",
        ),
        seeded_visit(
            "SV-2002",
            "P-2024-027",
            "Association of Malaya Hog Raisers",
            2,
            days_before(reference, 110),
            VisitStatus::Completed,
            "Feeding schedule posted and followed.",
        ),
        seeded_visit(
            "SV-2003",
            "P-2024-027",
            "Association of Malaya Hog Raisers",
            3,
            days_before(reference, 84),
            VisitStatus::Cancelled,
            "Visit cancelled after a typhoon signal was raised.",
        ),
        with_caretakers(
            seeded_visit(
                "SV-2004",
                "P-2024-027",
                "Association of Malaya Hog Raisers",
                4,
                days_before(reference, 62),
                VisitStatus::Completed,
                "Pens disinfected and two sows confirmed pregnant; feed stocks adequate for the quarter.",
            ),
            &["Ramon Bautista", "Jose Cruz"],
        ),
        seeded_visit(
            "SV-3001",
            "P-2023-104",
            "Bagong Pag-asa Weavers Coop",
            1,
            days_before(reference, 280),
            VisitStatus::Completed,
            "Looms operational.",
        ),
        seeded_visit(
            "SV-3002",
            "P-2023-104",
            "Bagong Pag-asa Weavers Coop",
            2,
            None,
            VisitStatus::Cancelled,
            "",
        ),
    ]
}

fn seeded_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId("P-2024-011".to_string()),
            name: "Upland Rice Production".to_string(),
            associations: vec![Association {
                id: AssociationId("A-2024-011".to_string()),
                name: "San Isidro Farmers Association".to_string(),
                location: Some("Barangay San Isidro".to_string()),
                active_members: Some(24),
                contact_person: Some("Elena Reyes".to_string()),
                contact_number: Some("0917 555 2031".to_string()),
            }],
        },
        Project {
            id: ProjectId("P-2024-027".to_string()),
            name: "Backyard Hog Raising".to_string(),
            associations: vec![Association {
                id: AssociationId("A-2024-027".to_string()),
                name: "Malaya Hog Raisers Association".to_string(),
                location: Some("Barangay Malaya".to_string()),
                active_members: Some(12),
                contact_person: Some("Ramon Bautista".to_string()),
                contact_number: None,
            }],
        },
        Project {
            id: ProjectId("P-2023-104".to_string()),
            name: "Handloom Weaving".to_string(),
            associations: vec![Association {
                id: AssociationId("A-2023-104".to_string()),
                name: "Bagong Pag-asa Weavers Cooperative".to_string(),
                location: Some("Barangay Bagong Pag-asa".to_string()),
                active_members: Some(18),
                contact_person: None,
                contact_number: None,
            }],
        },
    ]
}

fn seeded_caretaker(id: &str, name: &str, slp: Option<&str>, legacy: Option<&str>) -> Caretaker {
    Caretaker {
        id: CaretakerId(id.to_string()),
        name: name.to_string(),
        slp_association: slp.map(str::to_string),
        association_name: legacy.map(str::to_string),
    }
}

/// Roster labels intentionally span every style the program sees: exact
/// canonical names, prefix/suffix variants, a legacy-field-only record, a
/// blank label, and a label no canonical association carries.
fn seeded_caretakers() -> Vec<Caretaker> {
    vec![
        seeded_caretaker(
            "CT-101",
            "Elena Reyes",
            Some("San Isidro Farmers Association"),
            None,
        ),
        seeded_caretaker(
            "CT-102",
            "Jose Cruz",
            None,
            Some("Association of Malaya Hog Raisers"),
        ),
        seeded_caretaker(
            "CT-103",
            "Lourdes Ramos",
            Some("Bagong Pag-asa Weavers"),
            None,
        ),
        seeded_caretaker("CT-104", "Ana Flores", None, None),
        seeded_caretaker(
            "CT-105",
            "Ramon Bautista",
            Some("Malaya Hog Raisers Association"),
            None,
        ),
        seeded_caretaker(
            "CT-106",
            "Teodoro Lim",
            Some("Riverside Fisherfolk Alliance"),
            None,
        ),
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_filter(raw: &str) -> Result<RankingFilter, String> {
    raw.parse()
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
