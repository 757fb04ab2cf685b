use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::VisitGroup;
use super::domain::{ProjectId, VisitStatus};
use super::evaluation::{PerformanceBand, RankingEngine, ScoreComponent};

/// One ranked entry per project/association pair. Recomputed from scratch on
/// every invocation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRanking {
    pub project_id: ProjectId,
    pub association_name: String,
    pub visit_count: u32,
    pub completed_visits: u32,
    pub completion_rate: f64,
    pub last_visit_date: Option<NaiveDate>,
    pub last_visit_status: Option<VisitStatus>,
    pub days_since_last_visit: i64,
    pub score: f64,
    pub band: PerformanceBand,
    pub renewal_eligibility: bool,
    pub pig_addition_eligibility: bool,
    pub progress_percentage: u32,
    pub components: Vec<ScoreComponent>,
}

/// Scores every group and sorts descending by score.
///
/// The sort must stay stable: row position is the rank end users read, and
/// equal scores keep the aggregation (first-encounter) order.
pub fn rank_groups(groups: &[VisitGroup], engine: &RankingEngine) -> Vec<ProjectRanking> {
    let mut rankings: Vec<ProjectRanking> = groups
        .iter()
        .map(|group| {
            let outcome = engine.score(group);
            ProjectRanking {
                project_id: group.key.project_id.clone(),
                association_name: group.key.association_name.clone(),
                visit_count: group.total_visits,
                completed_visits: group.completed_visits,
                completion_rate: group.completion_rate,
                last_visit_date: group.last_visit_date,
                last_visit_status: group.last_visit_status,
                days_since_last_visit: group.days_since_last_visit,
                score: outcome.score,
                band: outcome.band,
                renewal_eligibility: outcome.eligibility.renewal,
                pig_addition_eligibility: outcome.eligibility.pig_addition,
                progress_percentage: group.progress_percentage(),
                components: outcome.components,
            }
        })
        .collect();

    rankings.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    rankings
}

/// Predicate views over an already-ranked sequence; filtering never re-sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingFilter {
    #[default]
    All,
    Renewal,
    PigAddition,
}

impl RankingFilter {
    pub const fn label(self) -> &'static str {
        match self {
            RankingFilter::All => "all",
            RankingFilter::Renewal => "renewal",
            RankingFilter::PigAddition => "pig_addition",
        }
    }

    pub fn keeps(self, ranking: &ProjectRanking) -> bool {
        match self {
            RankingFilter::All => true,
            RankingFilter::Renewal => ranking.renewal_eligibility,
            RankingFilter::PigAddition => ranking.pig_addition_eligibility,
        }
    }

    pub fn apply<'a>(self, rankings: &'a [ProjectRanking]) -> Vec<&'a ProjectRanking> {
        rankings
            .iter()
            .filter(|ranking| self.keeps(ranking))
            .collect()
    }
}

impl FromStr for RankingFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RankingFilter::All),
            "renewal" => Ok(RankingFilter::Renewal),
            "pig_addition" | "pig-addition" | "expansion" => Ok(RankingFilter::PigAddition),
            other => Err(format!("unknown eligibility filter '{other}'")),
        }
    }
}
