use std::sync::Arc;

use chrono::Duration;

use super::common::*;
use crate::workflows::monitoring::domain::VisitStatus;
use crate::workflows::monitoring::service::{MonitoringService, MonitoringServiceError};
use crate::workflows::monitoring::sources::SourceError;
use crate::workflows::monitoring::{RankingEngine, RankingFilter};

#[test]
fn memoizes_rankings_for_an_unchanged_snapshot() {
    let service = MonitoringService::new(
        Arc::new(SwappableSource::new(worked_example_visits())),
        RankingEngine::default(),
    );

    let first = service.rankings(reference_date()).expect("rankings");
    let second = service.rankings(reference_date()).expect("rankings");

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn recomputes_when_the_snapshot_changes() {
    let source = Arc::new(SwappableSource::new(worked_example_visits()));
    let service = MonitoringService::new(Arc::clone(&source), RankingEngine::default());

    let before = service.rankings(reference_date()).expect("rankings");
    let mut changed = worked_example_visits();
    changed.push(visit(
        "SV-9",
        "P2",
        "Hog Raisers Cooperative",
        1,
        3,
        VisitStatus::Completed,
    ));
    source.set_visits(changed);
    let after = service.rankings(reference_date()).expect("rankings");

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
}

#[test]
fn recomputes_when_the_reference_date_moves() {
    let service = MonitoringService::new(
        Arc::new(SwappableSource::new(worked_example_visits())),
        RankingEngine::default(),
    );
    let next_day = reference_date() + Duration::days(1);

    let today = service.rankings(reference_date()).expect("rankings");
    let tomorrow = service.rankings(next_day).expect("rankings");

    assert!(!Arc::ptr_eq(&today, &tomorrow));
    assert_eq!(today[0].days_since_last_visit, 10);
    assert_eq!(tomorrow[0].days_since_last_visit, 11);
}

#[test]
fn surfaces_source_failures() {
    let service = MonitoringService::new(Arc::new(UnavailableSource), RankingEngine::default());

    match service.rankings(reference_date()) {
        Err(MonitoringServiceError::Source(SourceError::Unavailable(reason))) => {
            assert!(reason.contains("offline"));
        }
        other => panic!("expected source error, got {other:?}"),
    }
}

#[test]
fn ranking_rows_enrich_from_the_association_directory() {
    let service = build_service();

    let rows = service
        .ranking_rows(RankingFilter::All, reference_date())
        .expect("rows");

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.rank, 1);
    assert_eq!(row.project_name.as_deref(), Some("Upland Rice Production"));
    assert_eq!(row.location.as_deref(), Some("San Isidro"));
    assert_eq!(row.active_members, Some(24));
    assert_eq!(row.display_score, 76);
    assert_eq!(row.band_label, "Good");
    assert_eq!(row.last_visit_status_label, Some("Scheduled"));
}

#[test]
fn filtered_rows_keep_their_full_list_positions() {
    let visits = vec![
        // Front-runner whose latest visit is still open.
        visit(
            "SV-1",
            "P1",
            "Farmers Association 1",
            1,
            95,
            VisitStatus::Completed,
        ),
        visit(
            "SV-2",
            "P1",
            "Farmers Association 1",
            2,
            70,
            VisitStatus::Completed,
        ),
        visit(
            "SV-3",
            "P1",
            "Farmers Association 1",
            3,
            40,
            VisitStatus::Completed,
        ),
        with_findings(
            visit(
                "SV-4",
                "P1",
                "Farmers Association 1",
                4,
                5,
                VisitStatus::Scheduled,
            ),
            &detailed_findings(),
        ),
        // Renewal-ready pair trailing on score.
        visit(
            "SV-5",
            "P2",
            "Hog Raisers Cooperative",
            1,
            120,
            VisitStatus::Completed,
        ),
        visit(
            "SV-6",
            "P2",
            "Hog Raisers Cooperative",
            2,
            90,
            VisitStatus::Completed,
        ),
        visit(
            "SV-7",
            "P2",
            "Hog Raisers Cooperative",
            3,
            60,
            VisitStatus::Cancelled,
        ),
        visit(
            "SV-8",
            "P2",
            "Hog Raisers Cooperative",
            4,
            30,
            VisitStatus::Completed,
        ),
    ];
    let source = StaticRecordSource {
        visits,
        projects: sample_projects(),
        caretakers: sample_caretakers(),
    };
    let service = MonitoringService::new(Arc::new(source), RankingEngine::default());

    let rows = service
        .ranking_rows(RankingFilter::Renewal, reference_date())
        .expect("rows");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].rank, 2);
    assert_eq!(rows[0].association_name, "Hog Raisers Cooperative");
}

#[test]
fn summary_rolls_up_bands_and_flags() {
    let service = build_service();

    let summary = service.summary(reference_date()).expect("summary");

    assert_eq!(summary.pairs_ranked, 1);
    assert_eq!(summary.band_counts.good, 1);
    assert_eq!(summary.band_counts.excellent, 0);
    assert_eq!(summary.renewal_eligible, 0);
    assert_eq!(summary.pig_addition_eligible, 0);
    assert_close(summary.average_score, 75.7);
    assert!(summary.stale_pairs.is_empty());
}

#[test]
fn summary_calls_out_pairs_past_the_expansion_window() {
    let visits = vec![
        visit(
            "SV-1",
            "P1",
            "Farmers Association 1",
            1,
            200,
            VisitStatus::Completed,
        ),
        visit(
            "SV-2",
            "P2",
            "Hog Raisers Cooperative",
            1,
            90,
            VisitStatus::Completed,
        ),
        visit(
            "SV-3",
            "P2",
            "Weavers Guild",
            1,
            10,
            VisitStatus::Completed,
        ),
    ];
    let source = StaticRecordSource {
        visits,
        projects: sample_projects(),
        caretakers: sample_caretakers(),
    };
    let service = MonitoringService::new(Arc::new(source), RankingEngine::default());

    let summary = service.summary(reference_date()).expect("summary");

    assert_eq!(summary.stale_pairs.len(), 2);
    assert_eq!(summary.stale_pairs[0].days_since_last_visit, 200);
    assert_eq!(summary.stale_pairs[1].days_since_last_visit, 90);
}

#[test]
fn groups_roster_under_canonical_headings() {
    let service = build_service();

    let grouping = service.caretaker_groups().expect("grouping");

    assert_eq!(grouping.groups.len(), 2);
    assert_eq!(grouping.assigned_count(), 2);
    let farmers = &grouping.groups[0];
    assert_eq!(farmers.association_name, "Farmers Association 1");
    assert_eq!(farmers.members.len(), 1);
    assert_eq!(farmers.members[0].name, "Maria Santos");
    assert_eq!(farmers.members[0].match_tier, "exact");
    let hogs = &grouping.groups[1];
    assert_eq!(hogs.members.len(), 1);
    assert_eq!(hogs.members[0].name, "Jose Cruz");
    assert_eq!(hogs.members[0].match_tier, "substring");
    assert_eq!(grouping.unassigned.len(), 1);
    assert_eq!(grouping.unassigned[0].name, "Ana Flores");
    assert!(grouping.unassigned[0].recorded_label.is_none());
}

#[test]
fn visit_candidates_match_loose_labels() {
    let service = build_service();

    let candidates = service
        .visit_candidates("Hog Raisers Cooperative")
        .expect("candidates");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Jose Cruz");
    assert_eq!(
        candidates[0].recorded_label,
        "association of hog raisers cooperative"
    );

    let none = service
        .visit_candidates("Basket Weavers Guild")
        .expect("candidates");
    assert!(none.is_empty());
}
