use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, info};

use super::aggregate::aggregate_visits;
use super::domain::SiteVisit;
use super::evaluation::RankingEngine;
use super::ranking::{rank_groups, ProjectRanking, RankingFilter};
use super::report::{PortfolioSummary, RankingRow};
use super::sources::{RecordSource, SourceError};
use crate::workflows::caretakers::{
    self, AssociationDirectory, CaretakerGrouping, VisitCandidate,
};

/// Service composing the record source, aggregation, and ranking engine.
///
/// Recomputation is total on every invocation, so the ranked list is memoized
/// per (visit snapshot hash, reference date); repeated calls over unchanged
/// data return the cached ranking without re-deriving it.
pub struct MonitoringService<S> {
    source: Arc<S>,
    engine: RankingEngine,
    memo: Mutex<Option<RankingMemo>>,
}

struct RankingMemo {
    snapshot_hash: u64,
    as_of: NaiveDate,
    rankings: Arc<Vec<ProjectRanking>>,
}

fn snapshot_hash(visits: &[SiteVisit]) -> u64 {
    let mut hasher = DefaultHasher::new();
    visits.hash(&mut hasher);
    hasher.finish()
}

impl<S> MonitoringService<S>
where
    S: RecordSource + 'static,
{
    pub fn new(source: Arc<S>, engine: RankingEngine) -> Self {
        Self {
            source,
            engine,
            memo: Mutex::new(None),
        }
    }

    /// Ranked pairs for the current visit snapshot, measured against `as_of`.
    pub fn rankings(
        &self,
        as_of: NaiveDate,
    ) -> Result<Arc<Vec<ProjectRanking>>, MonitoringServiceError> {
        let visits = self.source.site_visits()?;
        let snapshot_hash = snapshot_hash(&visits);

        {
            let memo = self.memo.lock().expect("ranking memo mutex poisoned");
            if let Some(cached) = memo.as_ref() {
                if cached.snapshot_hash == snapshot_hash && cached.as_of == as_of {
                    debug!(%as_of, "ranking memo hit");
                    return Ok(Arc::clone(&cached.rankings));
                }
            }
        }

        let groups = aggregate_visits(&visits, as_of);
        let rankings = Arc::new(rank_groups(&groups, &self.engine));
        info!(pairs = rankings.len(), %as_of, "ranked visit snapshot");

        let mut memo = self.memo.lock().expect("ranking memo mutex poisoned");
        *memo = Some(RankingMemo {
            snapshot_hash,
            as_of,
            rankings: Arc::clone(&rankings),
        });

        Ok(rankings)
    }

    /// Presentation rows for the ranked list, filtered by eligibility.
    /// Filtering trims rows without re-sorting, and each row keeps its
    /// position from the full ranking.
    pub fn ranking_rows(
        &self,
        filter: RankingFilter,
        as_of: NaiveDate,
    ) -> Result<Vec<RankingRow>, MonitoringServiceError> {
        let rankings = self.rankings(as_of)?;
        let directory = self.directory()?;

        Ok(rankings
            .iter()
            .enumerate()
            .filter(|(_, ranking)| filter.keeps(ranking))
            .map(|(position, ranking)| RankingRow::from_ranking(position + 1, ranking, &directory))
            .collect())
    }

    /// Portfolio roll-up across the full ranked list.
    pub fn summary(&self, as_of: NaiveDate) -> Result<PortfolioSummary, MonitoringServiceError> {
        let rankings = self.rankings(as_of)?;
        let stale_after_days = self.engine.eligibility_config().expansion_max_days_since_visit;
        Ok(PortfolioSummary::from_rankings(&rankings, stale_after_days))
    }

    /// Caretaker roster grouped under canonical association headings.
    pub fn caretaker_groups(&self) -> Result<CaretakerGrouping, MonitoringServiceError> {
        let roster = self.source.caretakers()?;
        let directory = self.directory()?;
        Ok(caretakers::group_caretakers(&roster, &directory))
    }

    /// Caretakers offered when attaching people to a visit for the given
    /// association.
    pub fn visit_candidates(
        &self,
        association_name: &str,
    ) -> Result<Vec<VisitCandidate>, MonitoringServiceError> {
        let roster = self.source.caretakers()?;
        Ok(caretakers::candidates_for(association_name, &roster)
            .into_iter()
            .map(|caretaker| VisitCandidate {
                id: caretaker.id.clone(),
                name: caretaker.name.clone(),
                recorded_label: caretaker.association_label().unwrap_or_default().to_string(),
            })
            .collect())
    }

    fn directory(&self) -> Result<AssociationDirectory, MonitoringServiceError> {
        let projects = self.source.projects()?;
        Ok(AssociationDirectory::from_projects(&projects))
    }
}

/// Error raised by the monitoring service.
#[derive(Debug, thiserror::Error)]
pub enum MonitoringServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
