mod summary;
mod views;

pub use summary::{BandCounts, PortfolioSummary, StalePair};
pub use views::RankingRow;
