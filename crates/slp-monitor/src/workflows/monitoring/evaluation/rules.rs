use super::super::aggregate::VisitGroup;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

/// Derives the four weighted sub-scores for a group. Every sub-score is
/// clamped to [0, 100] before weighting; nothing here rounds, since display
/// rounding belongs to the presentation boundary.
pub(crate) fn score_group(group: &VisitGroup, config: &ScoringConfig) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(4);

    let completion = group.completion_rate.clamp(0.0, 100.0);
    components.push(ScoreComponent {
        factor: ScoreFactor::Completion,
        raw_score: completion,
        weight: config.completion_weight,
        weighted_points: completion * config.completion_weight,
        notes: format!(
            "{} of {} visits completed",
            group.completed_visits, group.total_visits
        ),
    });

    let recency = (100.0 - group.days_since_last_visit as f64 * config.recency_decay_per_day)
        .clamp(0.0, 100.0);
    components.push(ScoreComponent {
        factor: ScoreFactor::Recency,
        raw_score: recency,
        weight: config.recency_weight,
        weighted_points: recency * config.recency_weight,
        notes: match group.last_visit_date {
            Some(date) => format!(
                "last visit {} ({} days ago)",
                date, group.days_since_last_visit
            ),
            None => format!(
                "no dated visit on record, assumed {} days stale",
                group.days_since_last_visit
            ),
        },
    });

    let volume =
        (f64::from(group.total_visits) * config.volume_points_per_visit).clamp(0.0, 100.0);
    components.push(ScoreComponent {
        factor: ScoreFactor::Volume,
        raw_score: volume,
        weight: config.volume_weight,
        weighted_points: volume * config.volume_weight,
        notes: format!("{} visit(s) on record", group.total_visits),
    });

    let findings_chars = group.last_visit_findings.chars().count();
    let findings = if findings_chars > config.findings_detail_threshold {
        100.0
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::FindingsQuality,
        raw_score: findings,
        weight: config.findings_weight,
        weighted_points: findings * config.findings_weight,
        notes: format!(
            "latest findings {} characters against threshold {}",
            findings_chars, config.findings_detail_threshold
        ),
    });

    let total = components
        .iter()
        .map(|component| component.weighted_points)
        .sum();

    (components, total)
}
