use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::VisitStatus;
use super::super::evaluation::{PerformanceBand, ScoreComponent};
use super::super::ranking::ProjectRanking;
use crate::workflows::caretakers::AssociationDirectory;

/// Presentation row for one ranked pair, enriched from the association
/// directory. `display_score` is the only place the score gets rounded; the
/// unrounded value rides along for audits.
#[derive(Debug, Clone, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub project_id: String,
    pub project_name: Option<String>,
    pub association_name: String,
    pub location: Option<String>,
    pub active_members: Option<u32>,
    pub visit_count: u32,
    pub completed_visits: u32,
    pub progress_percentage: u32,
    pub last_visit_date: Option<NaiveDate>,
    pub last_visit_status: Option<VisitStatus>,
    pub last_visit_status_label: Option<&'static str>,
    pub days_since_last_visit: i64,
    pub score: f64,
    pub display_score: i64,
    pub band: PerformanceBand,
    pub band_label: &'static str,
    pub renewal_eligibility: bool,
    pub pig_addition_eligibility: bool,
    pub components: Vec<ScoreComponent>,
}

impl RankingRow {
    /// `rank` is the 1-based position in the full ranked list; filtered views
    /// keep the original positions so readers see where a pair truly sits.
    pub fn from_ranking(
        rank: usize,
        ranking: &ProjectRanking,
        directory: &AssociationDirectory,
    ) -> Self {
        let entry = directory
            .reconcile(&ranking.association_name)
            .map(|(entry, _)| entry);

        Self {
            rank,
            project_id: ranking.project_id.0.clone(),
            project_name: entry.map(|entry| entry.project_name.clone()),
            association_name: ranking.association_name.clone(),
            location: entry.and_then(|entry| entry.location.clone()),
            active_members: entry.and_then(|entry| entry.active_members),
            visit_count: ranking.visit_count,
            completed_visits: ranking.completed_visits,
            progress_percentage: ranking.progress_percentage,
            last_visit_date: ranking.last_visit_date,
            last_visit_status: ranking.last_visit_status,
            last_visit_status_label: ranking.last_visit_status.map(VisitStatus::label),
            days_since_last_visit: ranking.days_since_last_visit,
            score: ranking.score,
            display_score: ranking.score.round() as i64,
            band: ranking.band,
            band_label: ranking.band.label(),
            renewal_eligibility: ranking.renewal_eligibility,
            pig_addition_eligibility: ranking.pig_addition_eligibility,
            components: ranking.components.clone(),
        }
    }
}
