//! Site-visit monitoring: aggregation, scoring, eligibility, and ranking.
//!
//! The engine is a pure transformation: one visit snapshot plus a reference
//! date in, one ranked list out. Every recency computation takes the date
//! explicitly; only the delivery shell resolves wall-clock time.

pub mod aggregate;
pub mod domain;
pub(crate) mod evaluation;
pub mod ranking;
pub mod report;
pub mod router;
pub mod service;
pub mod sources;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_visits, PairKey, VisitGroup, STALE_SENTINEL_DAYS};
pub use domain::{
    Association, AssociationId, Caretaker, CaretakerId, CaretakerRef, Project, ProjectId,
    SiteVisit, VisitId, VisitStatus,
};
pub use evaluation::{
    EligibilityConfig, EligibilityFlags, PerformanceBand, RankingEngine, ScoreComponent,
    ScoreFactor, ScoreOutcome, ScoringConfig,
};
pub use ranking::{rank_groups, ProjectRanking, RankingFilter};
pub use report::{BandCounts, PortfolioSummary, RankingRow, StalePair};
pub use router::monitoring_router;
pub use service::{MonitoringService, MonitoringServiceError};
pub use sources::{RecordSource, SourceError};
