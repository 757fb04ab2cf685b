use serde::Serialize;

use super::super::evaluation::PerformanceBand;
use super::super::ranking::ProjectRanking;

/// How many stale call-outs a summary carries at most.
const STALE_CALLOUT_LIMIT: usize = 5;

/// Roll-up of a ranked snapshot for the program dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub pairs_ranked: usize,
    /// Mean score rounded to one decimal; the underlying scores stay raw.
    pub average_score: f64,
    pub band_counts: BandCounts,
    pub renewal_eligible: usize,
    pub pig_addition_eligible: usize,
    pub stale_pairs: Vec<StalePair>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

/// Pair whose last visit is older than the expansion recency window; these
/// are the first candidates for a follow-up visit.
#[derive(Debug, Clone, Serialize)]
pub struct StalePair {
    pub project_id: String,
    pub association_name: String,
    pub days_since_last_visit: i64,
}

impl PortfolioSummary {
    pub fn from_rankings(rankings: &[ProjectRanking], stale_after_days: i64) -> Self {
        let mut band_counts = BandCounts::default();
        let mut renewal_eligible = 0;
        let mut pig_addition_eligible = 0;
        let mut score_total = 0.0;
        let mut stale_pairs = Vec::new();

        for ranking in rankings {
            match ranking.band {
                PerformanceBand::Excellent => band_counts.excellent += 1,
                PerformanceBand::Good => band_counts.good += 1,
                PerformanceBand::Fair => band_counts.fair += 1,
                PerformanceBand::Poor => band_counts.poor += 1,
            }
            if ranking.renewal_eligibility {
                renewal_eligible += 1;
            }
            if ranking.pig_addition_eligibility {
                pig_addition_eligible += 1;
            }
            score_total += ranking.score;
            if ranking.days_since_last_visit > stale_after_days {
                stale_pairs.push(StalePair {
                    project_id: ranking.project_id.0.clone(),
                    association_name: ranking.association_name.clone(),
                    days_since_last_visit: ranking.days_since_last_visit,
                });
            }
        }

        stale_pairs.sort_by(|a, b| b.days_since_last_visit.cmp(&a.days_since_last_visit));
        stale_pairs.truncate(STALE_CALLOUT_LIMIT);

        let average_score = if rankings.is_empty() {
            0.0
        } else {
            (score_total / rankings.len() as f64 * 10.0).round() / 10.0
        };

        Self {
            pairs_ranked: rankings.len(),
            average_score,
            band_counts,
            renewal_eligible,
            pig_addition_eligible,
            stale_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::monitoring::aggregate::{PairKey, VisitGroup};
    use crate::workflows::monitoring::domain::ProjectId;
    use crate::workflows::monitoring::evaluation::RankingEngine;
    use crate::workflows::monitoring::ranking::rank_groups;

    fn stale_group(project: &str, days: i64) -> VisitGroup {
        VisitGroup {
            key: PairKey {
                project_id: ProjectId(project.to_string()),
                association_name: format!("{project} Growers"),
            },
            total_visits: 4,
            completed_visits: 2,
            completion_rate: 50.0,
            last_visit_date: None,
            last_visit_status: None,
            last_visit_findings: String::new(),
            days_since_last_visit: days,
        }
    }

    #[test]
    fn empty_snapshot_summarizes_to_zeroes() {
        let summary = PortfolioSummary::from_rankings(&[], 60);

        assert_eq!(summary.pairs_ranked, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.band_counts, BandCounts::default());
        assert!(summary.stale_pairs.is_empty());
    }

    #[test]
    fn stale_callouts_are_sorted_and_capped() {
        let groups: Vec<VisitGroup> = (0..7i64)
            .map(|offset| stale_group(&format!("P{offset}"), 100 + offset))
            .collect();
        let rankings = rank_groups(&groups, &RankingEngine::default());

        let summary = PortfolioSummary::from_rankings(&rankings, 60);

        assert_eq!(summary.stale_pairs.len(), STALE_CALLOUT_LIMIT);
        assert_eq!(summary.stale_pairs[0].days_since_last_visit, 106);
        assert_eq!(summary.stale_pairs[4].days_since_last_visit, 102);
    }
}
