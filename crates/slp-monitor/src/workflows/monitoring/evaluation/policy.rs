use serde::{Deserialize, Serialize};

use super::super::aggregate::VisitGroup;
use super::super::domain::VisitStatus;
use super::config::EligibilityConfig;

/// Boolean gates controlling renewal and livestock expansion for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityFlags {
    pub renewal: bool,
    pub pig_addition: bool,
}

impl EligibilityFlags {
    pub const fn summary(self) -> &'static str {
        match (self.renewal, self.pig_addition) {
            (true, true) => "eligible for renewal and livestock expansion",
            (true, false) => "eligible for renewal only",
            (false, true) => "eligible for livestock expansion only",
            (false, false) => "not eligible",
        }
    }
}

/// Applies both rule conjunctions. Missing data (no last visit, unknown
/// status) leaves the affected predicate false; nothing here errors.
pub(crate) fn decide_eligibility(
    group: &VisitGroup,
    score: f64,
    config: &EligibilityConfig,
) -> EligibilityFlags {
    let last_visit_completed = group.last_visit_status == Some(VisitStatus::Completed);

    let renewal = group.completed_visits >= config.renewal_min_completed_visits
        && group.days_since_last_visit <= config.renewal_max_days_since_visit
        && group.completion_rate >= config.renewal_min_completion_rate
        && last_visit_completed;

    let pig_addition = score >= config.expansion_min_score
        && group.completed_visits >= config.expansion_min_completed_visits
        && last_visit_completed
        && group.days_since_last_visit <= config.expansion_max_days_since_visit;

    EligibilityFlags {
        renewal,
        pig_addition,
    }
}
