use serde::{Deserialize, Serialize};

/// Weights and decay constants applied to aggregated visit statistics.
///
/// The defaults are fixed program policy: changing any value reclassifies
/// pairs that were already published to coordinators, so treat edits as a
/// policy change and not a refactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub completion_weight: f64,
    pub recency_weight: f64,
    pub volume_weight: f64,
    pub findings_weight: f64,
    /// Points removed from the recency sub-score per day since the last visit.
    pub recency_decay_per_day: f64,
    /// Points granted per recorded visit; four visits reach the cap of 100.
    pub volume_points_per_visit: f64,
    /// Minimum character count before a findings narrative counts as detailed.
    pub findings_detail_threshold: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            completion_weight: 0.40,
            recency_weight: 0.30,
            volume_weight: 0.20,
            findings_weight: 0.10,
            recency_decay_per_day: 2.0,
            volume_points_per_visit: 25.0,
            findings_detail_threshold: 50,
        }
    }
}

/// Threshold rule-sets gating membership renewal and livestock expansion.
///
/// Expansion is deliberately stricter on recency and looser on volume than
/// renewal; both additionally require the most recent visit to be completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    pub renewal_min_completed_visits: u32,
    pub renewal_max_days_since_visit: i64,
    pub renewal_min_completion_rate: f64,
    pub expansion_min_score: f64,
    pub expansion_min_completed_visits: u32,
    pub expansion_max_days_since_visit: i64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            renewal_min_completed_visits: 2,
            renewal_max_days_since_visit: 90,
            renewal_min_completion_rate: 70.0,
            expansion_min_score: 65.0,
            expansion_min_completed_visits: 1,
            expansion_max_days_since_visit: 60,
        }
    }
}
