use std::io::Read;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::FieldLogImportError;
use crate::workflows::monitoring::domain::{
    CaretakerRef, ProjectId, SiteVisit, VisitId, VisitStatus,
};

#[derive(Debug, Deserialize)]
struct FieldLogRow {
    #[serde(rename = "Visit ID")]
    id: String,
    #[serde(rename = "Project ID")]
    project_id: String,
    #[serde(rename = "Association")]
    association: String,
    #[serde(rename = "Visit No", default, deserialize_with = "empty_string_as_none")]
    visit_number: Option<String>,
    #[serde(
        rename = "Visit Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    visit_date: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Findings", default, deserialize_with = "empty_string_as_none")]
    findings: Option<String>,
    #[serde(
        rename = "Caretakers",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    caretakers: Option<String>,
}

pub(crate) fn parse_visits<R: Read>(reader: R) -> Result<Vec<SiteVisit>, FieldLogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut visits = Vec::new();

    for record in csv_reader.deserialize::<FieldLogRow>() {
        visits.push(visit_from_row(record?));
    }

    Ok(visits)
}

fn visit_from_row(row: FieldLogRow) -> SiteVisit {
    let visit_date = row.visit_date.as_deref().and_then(|raw| {
        let parsed = parse_visit_date(raw);
        if parsed.is_none() {
            warn!(visit_id = %row.id, raw, "unparseable visit date, treating visit as stale");
        }
        parsed
    });

    let status = row
        .status
        .as_deref()
        .map(|raw| parse_status(raw, &row.id))
        .unwrap_or(VisitStatus::Scheduled);

    let visit_number = row
        .visit_number
        .as_deref()
        .and_then(|raw| raw.parse::<u8>().ok())
        .unwrap_or(1);

    let caretakers = row
        .caretakers
        .as_deref()
        .map(parse_caretakers)
        .unwrap_or_default();

    SiteVisit {
        id: VisitId(row.id),
        project_id: ProjectId(row.project_id),
        association_name: row.association,
        visit_number,
        visit_date,
        status,
        findings: row.findings.unwrap_or_default(),
        caretakers,
    }
}

fn parse_status(raw: &str, visit_id: &str) -> VisitStatus {
    let normalized = raw.trim().to_lowercase().replace([' ', '_'], "-");
    match normalized.as_str() {
        "scheduled" => VisitStatus::Scheduled,
        "in-progress" | "ongoing" => VisitStatus::InProgress,
        "completed" | "done" => VisitStatus::Completed,
        "cancelled" | "canceled" => VisitStatus::Cancelled,
        _ => {
            warn!(visit_id, status = raw, "unknown visit status, defaulting to scheduled");
            VisitStatus::Scheduled
        }
    }
}

/// Field logs arrive with a mix of timestamp and date formats depending on
/// which export produced them.
fn parse_visit_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok()
}

/// The caretakers column is a semicolon list of names captured at visit time.
fn parse_caretakers(raw: &str) -> Vec<CaretakerRef> {
    raw.split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| CaretakerRef {
            id: None,
            name: name.to_string(),
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Visit ID,Project ID,Association,Visit No,Visit Date,Status,Findings,Caretakers\n";

    fn parse(rows: &str) -> Vec<SiteVisit> {
        let data = format!("{HEADER}{rows}");
        parse_visits(data.as_bytes()).expect("log parses")
    }

    #[test]
    fn parses_a_complete_row() {
        let visits = parse(
            "SV-1,P1,Rice Growers Association,2,2025-07-14,Completed,Pens in good order,Maria Santos; Jose Cruz\n",
        );
        assert_eq!(visits.len(), 1);
        let visit = &visits[0];
        assert_eq!(visit.project_id, ProjectId("P1".to_string()));
        assert_eq!(visit.visit_number, 2);
        assert_eq!(
            visit.visit_date,
            NaiveDate::from_ymd_opt(2025, 7, 14)
        );
        assert_eq!(visit.status, VisitStatus::Completed);
        assert_eq!(visit.caretakers.len(), 2);
        assert_eq!(visit.caretakers[1].name, "Jose Cruz");
    }

    #[test]
    fn accepts_timestamp_and_us_date_formats() {
        let visits = parse(
            "SV-1,P1,Rice Growers Association,1,2025-07-14T08:30:00Z,Completed,,\nSV-2,P1,Rice Growers Association,2,07/14/2025,Completed,,\n",
        );
        let expected = NaiveDate::from_ymd_opt(2025, 7, 14);
        assert_eq!(visits[0].visit_date, expected);
        assert_eq!(visits[1].visit_date, expected);
    }

    #[test]
    fn unparseable_date_degrades_to_none_instead_of_failing() {
        let visits = parse("SV-1,P1,Rice Growers Association,1,sometime in June,Completed,,\n");
        assert_eq!(visits[0].visit_date, None);
    }

    #[test]
    fn unknown_status_defaults_to_scheduled() {
        let visits = parse("SV-1,P1,Rice Growers Association,1,2025-07-14,Deferred,,\n");
        assert_eq!(visits[0].status, VisitStatus::Scheduled);
    }

    #[test]
    fn status_tokens_tolerate_spacing_and_case() {
        let visits = parse(
            "SV-1,P1,Rice Growers Association,1,2025-07-14,In Progress,,\nSV-2,P1,Rice Growers Association,2,2025-07-15,CANCELLED,,\n",
        );
        assert_eq!(visits[0].status, VisitStatus::InProgress);
        assert_eq!(visits[1].status, VisitStatus::Cancelled);
    }

    #[test]
    fn blank_optional_columns_take_defaults() {
        let visits = parse("SV-1,P1,Rice Growers Association,,,,,\n");
        let visit = &visits[0];
        assert_eq!(visit.visit_number, 1);
        assert_eq!(visit.visit_date, None);
        assert_eq!(visit.status, VisitStatus::Scheduled);
        assert!(visit.findings.is_empty());
        assert!(visit.caretakers.is_empty());
    }
}
