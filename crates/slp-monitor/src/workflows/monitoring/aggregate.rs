use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::NaiveDate;

use super::domain::{ProjectId, SiteVisit, VisitStatus};

/// Recency sentinel applied when a group carries no usable visit date at all.
pub const STALE_SENTINEL_DAYS: i64 = 365;

/// Grouping key: the literal pair exactly as written on the visit records.
/// Reconciliation of loose names happens on the caretaker side, never here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub project_id: ProjectId,
    pub association_name: String,
}

/// Aggregated statistics for one project/association pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitGroup {
    pub key: PairKey,
    pub total_visits: u32,
    pub completed_visits: u32,
    pub completion_rate: f64,
    pub last_visit_date: Option<NaiveDate>,
    pub last_visit_status: Option<VisitStatus>,
    pub last_visit_findings: String,
    pub days_since_last_visit: i64,
}

impl VisitGroup {
    /// Share of the four tracked visits completed, as a rounded percentage.
    pub fn progress_percentage(&self) -> u32 {
        let denominator = self.total_visits.max(4);
        let ratio = f64::from(self.completed_visits) / f64::from(denominator) * 100.0;
        ratio.round() as u32
    }
}

/// Groups visits by their literal pair key and derives per-group statistics,
/// measuring recency against the supplied reference date.
///
/// Output order is the first-encounter order of pairs in the input slice, so
/// repeated invocations over the same snapshot produce the same sequence.
pub fn aggregate_visits(visits: &[SiteVisit], today: NaiveDate) -> Vec<VisitGroup> {
    let mut order: Vec<PairKey> = Vec::new();
    let mut buckets: HashMap<PairKey, Vec<&SiteVisit>> = HashMap::new();

    for visit in visits {
        let key = PairKey {
            project_id: visit.project_id.clone(),
            association_name: visit.association_name.clone(),
        };
        let bucket = match buckets.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(Vec::new())
            }
        };
        bucket.push(visit);
    }

    order
        .into_iter()
        .map(|key| {
            let group_visits = buckets.remove(&key).unwrap_or_default();
            build_group(key, group_visits, today)
        })
        .collect()
}

fn build_group(key: PairKey, mut visits: Vec<&SiteVisit>, today: NaiveDate) -> VisitGroup {
    let total_visits = visits.len() as u32;
    let completed_visits = visits
        .iter()
        .filter(|visit| visit.status == VisitStatus::Completed)
        .count() as u32;
    let completion_rate = if total_visits > 0 {
        f64::from(completed_visits) / f64::from(total_visits) * 100.0
    } else {
        0.0
    };

    // Most recent first; undated visits sort last. When two visits share the
    // most recent date, the higher visit number wins, then incoming order.
    visits.sort_by(|a, b| match (a.visit_date, b.visit_date) {
        (Some(lhs), Some(rhs)) => rhs
            .cmp(&lhs)
            .then_with(|| b.visit_number.cmp(&a.visit_number)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.visit_number.cmp(&a.visit_number),
    });

    let last_visit = visits.first().copied();
    let last_visit_date = last_visit.and_then(|visit| visit.visit_date);
    let days_since_last_visit = last_visit_date
        .map(|date| (today - date).num_days())
        .unwrap_or(STALE_SENTINEL_DAYS);

    VisitGroup {
        key,
        total_visits,
        completed_visits,
        completion_rate,
        last_visit_date,
        last_visit_status: last_visit.map(|visit| visit.status),
        last_visit_findings: last_visit
            .map(|visit| visit.findings.clone())
            .unwrap_or_default(),
        days_since_last_visit,
    }
}
