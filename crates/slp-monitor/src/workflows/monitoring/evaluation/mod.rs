mod config;
mod policy;
mod rules;

pub use config::{EligibilityConfig, ScoringConfig};
pub use policy::EligibilityFlags;

use serde::{Deserialize, Serialize};

use super::aggregate::VisitGroup;
use policy::decide_eligibility;

/// Stateless engine applying the scoring rubric and eligibility gates to an
/// aggregated visit group.
pub struct RankingEngine {
    scoring: ScoringConfig,
    eligibility: EligibilityConfig,
}

impl RankingEngine {
    pub fn new(scoring: ScoringConfig, eligibility: EligibilityConfig) -> Self {
        Self {
            scoring,
            eligibility,
        }
    }

    pub fn eligibility_config(&self) -> &EligibilityConfig {
        &self.eligibility
    }

    pub fn score(&self, group: &VisitGroup) -> ScoreOutcome {
        let (components, total) = rules::score_group(group, &self.scoring);
        let score = total.clamp(0.0, 100.0);
        let eligibility = decide_eligibility(group, score, &self.eligibility);

        ScoreOutcome {
            score,
            band: PerformanceBand::for_score(score),
            eligibility,
            components,
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), EligibilityConfig::default())
    }
}

/// The four lawful signals feeding a pair's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Completion,
    Recency,
    Volume,
    FindingsQuality,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::Completion => "Completion",
            ScoreFactor::Recency => "Recency",
            ScoreFactor::Volume => "Volume",
            ScoreFactor::FindingsQuality => "Findings Quality",
        }
    }
}

/// Discrete contribution to a pair's score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_points: f64,
    pub notes: String,
}

/// Performance classification over the unrounded score, highest band first.
/// The ladder is a total partition of [0, 100] with closed lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PerformanceBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            PerformanceBand::Excellent
        } else if score >= 60.0 {
            PerformanceBand::Good
        } else if score >= 40.0 {
            PerformanceBand::Fair
        } else {
            PerformanceBand::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent",
            PerformanceBand::Good => "Good",
            PerformanceBand::Fair => "Fair",
            PerformanceBand::Poor => "Poor",
        }
    }
}

/// Evaluation output for one pair: composite score, band, gates, and the
/// component trail the numbers were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub score: f64,
    pub band: PerformanceBand,
    pub eligibility: EligibilityFlags,
    pub components: Vec<ScoreComponent>,
}
