use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::workflows::monitoring::aggregate::{PairKey, VisitGroup};
use crate::workflows::monitoring::domain::{
    Association, AssociationId, Caretaker, CaretakerId, Project, ProjectId, SiteVisit, VisitId,
    VisitStatus,
};
use crate::workflows::monitoring::evaluation::RankingEngine;
use crate::workflows::monitoring::service::MonitoringService;
use crate::workflows::monitoring::sources::{RecordSource, SourceError};

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 25).expect("valid reference date")
}

/// 80 characters, comfortably past the 50-character detail threshold.
pub(super) fn detailed_findings() -> String {
    "Pens repaired and restocked; feeding schedule followed and weights logged daily.".to_string()
}

pub(super) fn visit(
    id: &str,
    project: &str,
    association: &str,
    number: u8,
    days_ago: i64,
    status: VisitStatus,
) -> SiteVisit {
    SiteVisit {
        id: VisitId(id.to_string()),
        project_id: ProjectId(project.to_string()),
        association_name: association.to_string(),
        visit_number: number,
        visit_date: reference_date().checked_sub_signed(Duration::days(days_ago)),
        status,
        findings: String::new(),
        caretakers: Vec::new(),
    }
}

pub(super) fn with_findings(mut visit: SiteVisit, findings: &str) -> SiteVisit {
    visit.findings = findings.to_string();
    visit
}

pub(super) fn undated(mut visit: SiteVisit) -> SiteVisit {
    visit.visit_date = None;
    visit
}

/// The published worked example: three visits for one pair dated 95, 40, and
/// 10 days back, completed/completed/scheduled in chronological order, with a
/// detailed narrative on the most recent visit.
pub(super) fn worked_example_visits() -> Vec<SiteVisit> {
    vec![
        visit(
            "SV-1",
            "P1",
            "Farmers Association 1",
            1,
            95,
            VisitStatus::Completed,
        ),
        visit(
            "SV-2",
            "P1",
            "Farmers Association 1",
            2,
            40,
            VisitStatus::Completed,
        ),
        with_findings(
            visit(
                "SV-3",
                "P1",
                "Farmers Association 1",
                3,
                10,
                VisitStatus::Scheduled,
            ),
            &detailed_findings(),
        ),
    ]
}

/// Direct group construction for scoring and eligibility tests.
pub(super) fn group(total: u32, completed: u32, days_since: i64) -> VisitGroup {
    VisitGroup {
        key: PairKey {
            project_id: ProjectId("P1".to_string()),
            association_name: "Farmers Association 1".to_string(),
        },
        total_visits: total,
        completed_visits: completed,
        completion_rate: if total > 0 {
            f64::from(completed) / f64::from(total) * 100.0
        } else {
            0.0
        },
        last_visit_date: reference_date().checked_sub_signed(Duration::days(days_since)),
        last_visit_status: Some(VisitStatus::Completed),
        last_visit_findings: String::new(),
        days_since_last_visit: days_since,
    }
}

pub(super) fn with_last_status(mut group: VisitGroup, status: VisitStatus) -> VisitGroup {
    group.last_visit_status = Some(status);
    group
}

pub(super) fn sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId("P1".to_string()),
            name: "Upland Rice Production".to_string(),
            associations: vec![Association {
                id: AssociationId("A1".to_string()),
                name: "Farmers Association 1".to_string(),
                location: Some("San Isidro".to_string()),
                active_members: Some(24),
                contact_person: Some("Elena Reyes".to_string()),
                contact_number: None,
            }],
        },
        Project {
            id: ProjectId("P2".to_string()),
            name: "Backyard Hog Raising".to_string(),
            associations: vec![Association {
                id: AssociationId("A2".to_string()),
                name: "Hog Raisers Cooperative".to_string(),
                location: Some("Santa Cruz".to_string()),
                active_members: Some(12),
                contact_person: None,
                contact_number: None,
            }],
        },
    ]
}

pub(super) fn sample_caretakers() -> Vec<Caretaker> {
    vec![
        Caretaker {
            id: CaretakerId("CT-1".to_string()),
            name: "Maria Santos".to_string(),
            slp_association: Some("Farmers Association 1".to_string()),
            association_name: None,
        },
        Caretaker {
            id: CaretakerId("CT-2".to_string()),
            name: "Jose Cruz".to_string(),
            slp_association: None,
            association_name: Some("association of hog raisers cooperative".to_string()),
        },
        Caretaker {
            id: CaretakerId("CT-3".to_string()),
            name: "Ana Flores".to_string(),
            slp_association: Some("  ".to_string()),
            association_name: None,
        },
    ]
}

#[derive(Default)]
pub(super) struct StaticRecordSource {
    pub(super) visits: Vec<SiteVisit>,
    pub(super) projects: Vec<Project>,
    pub(super) caretakers: Vec<Caretaker>,
}

impl RecordSource for StaticRecordSource {
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

/// Source whose visit set can be swapped mid-test to exercise memo
/// invalidation.
pub(super) struct SwappableSource {
    visits: Mutex<Vec<SiteVisit>>,
}

impl SwappableSource {
    pub(super) fn new(visits: Vec<SiteVisit>) -> Self {
        Self {
            visits: Mutex::new(visits),
        }
    }

    pub(super) fn set_visits(&self, visits: Vec<SiteVisit>) {
        *self.visits.lock().expect("visit mutex poisoned") = visits;
    }
}

impl RecordSource for SwappableSource {
    fn site_visits(&self) -> Result<Vec<SiteVisit>, SourceError> {
        Ok(self.visits.lock().expect("visit mutex poisoned").clone())
    }

    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        Ok(sample_projects())
    }

    fn caretakers(&self) -> Result<Vec<Caretaker>, SourceError> {
        Ok(sample_caretakers())
    }
}

pub(super) struct UnavailableSource;

impl RecordSource for UnavailableSource {
    fn site_visits(&self) -> Result<Vec<SiteVisit>, SourceError> {
        Err(SourceError::Unavailable("record store offline".to_string()))
    }

    fn projects(&self) -> Result<Vec<Project>, SourceError> {
        Err(SourceError::Unavailable("record store offline".to_string()))
    }

    fn caretakers(&self) -> Result<Vec<Caretaker>, SourceError> {
        Err(SourceError::Unavailable("record store offline".to_string()))
    }
}

pub(super) fn build_service() -> Arc<MonitoringService<StaticRecordSource>> {
    let source = StaticRecordSource {
        visits: worked_example_visits(),
        projects: sample_projects(),
        caretakers: sample_caretakers(),
    };
    Arc::new(MonitoringService::new(
        Arc::new(source),
        RankingEngine::default(),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
