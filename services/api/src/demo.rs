use crate::infra::InMemoryRecordSource;
use chrono::{Local, NaiveDate};
use clap::Args;
use slp_monitor::error::AppError;
use slp_monitor::workflows::caretakers::{CaretakerGrouping, VisitCandidate};
use slp_monitor::workflows::monitoring::{
    EligibilityFlags, MonitoringService, PortfolioSummary, RankingEngine, RankingFilter,
    RankingRow,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Reference date for recency math (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Optional field-log CSV export to rank instead of the seeded records.
    #[arg(long)]
    pub(crate) field_log: Option<PathBuf>,
    /// Restrict the table to one gate: all, renewal, or pig_addition.
    #[arg(long, value_parser = crate::infra::parse_filter)]
    pub(crate) eligibility: Option<RankingFilter>,
    /// Print the per-factor score breakdown under each row.
    #[arg(long)]
    pub(crate) show_components: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CaretakerArgs {
    /// List visit candidates for one association instead of the full roster.
    #[arg(long)]
    pub(crate) association: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for recency math (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Optional field-log CSV export to rank instead of the seeded records.
    #[arg(long)]
    pub(crate) field_log: Option<PathBuf>,
    /// Print the per-factor score breakdown under each ranking row.
    #[arg(long)]
    pub(crate) show_components: bool,
    /// Skip the caretaker reconciliation portion of the demo.
    #[arg(long)]
    pub(crate) skip_caretakers: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        as_of,
        field_log,
        eligibility,
        show_components,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let filter = eligibility.unwrap_or_default();
    let (source, imported) = load_record_source(field_log, as_of)?;
    let service = MonitoringService::new(Arc::new(source), RankingEngine::default());

    let rows = service.ranking_rows(filter, as_of)?;
    render_rankings(&rows, as_of, filter, imported, show_components);

    Ok(())
}

pub(crate) fn run_caretakers(args: CaretakerArgs) -> Result<(), AppError> {
    let source = InMemoryRecordSource::seeded(Local::now().date_naive());
    let service = MonitoringService::new(Arc::new(source), RankingEngine::default());

    match args.association {
        Some(association) => {
            let candidates = service.visit_candidates(&association)?;
            render_candidates(&association, &candidates);
        }
        None => {
            let grouping = service.caretaker_groups()?;
            render_caretakers(&grouping);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        field_log,
        show_components,
        skip_caretakers,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Livelihood monitoring demo");
    let (source, imported) = load_record_source(field_log, as_of)?;
    let service = MonitoringService::new(Arc::new(source), RankingEngine::default());

    let rows = service.ranking_rows(RankingFilter::All, as_of)?;
    render_rankings(&rows, as_of, RankingFilter::All, imported, show_components);

    let summary = service.summary(as_of)?;
    println!();
    render_summary(&summary);

    if skip_caretakers {
        return Ok(());
    }

    let grouping = service.caretaker_groups()?;
    println!();
    render_caretakers(&grouping);

    if let Some(top) = rows.first() {
        let candidates = service.visit_candidates(&top.association_name)?;
        println!();
        render_candidates(&top.association_name, &candidates);
    }

    Ok(())
}

pub(crate) fn load_record_source(
    field_log: Option<PathBuf>,
    reference: NaiveDate,
) -> Result<(InMemoryRecordSource, bool), AppError> {
    match field_log {
        Some(path) => InMemoryRecordSource::from_field_log(&path)
            .map(|source| (source, true))
            .map_err(AppError::from),
        None => Ok((InMemoryRecordSource::seeded(reference), false)),
    }
}

fn render_rankings(
    rows: &[RankingRow],
    as_of: NaiveDate,
    filter: RankingFilter,
    imported: bool,
    show_components: bool,
) {
    println!(
        "Site visit rankings (as of {as_of}, filter: {})",
        filter.label()
    );
    if imported {
        println!("Data source: field log export");
    } else {
        println!("Data source: seeded monitoring records");
    }

    if rows.is_empty() {
        println!("\nNo pairs match the selected filter");
        return;
    }

    for row in rows {
        match &row.project_name {
            Some(name) => println!(
                "\n{:>2}. {} | {} [{}]",
                row.rank, row.association_name, name, row.project_id
            ),
            None => println!("\n{:>2}. {} [{}]", row.rank, row.association_name, row.project_id),
        }
        match (&row.location, row.active_members) {
            (Some(location), Some(members)) => {
                println!("    {location} | {members} active members")
            }
            (Some(location), None) => println!("    {location}"),
            (None, Some(members)) => println!("    {members} active members"),
            (None, None) => {}
        }
        println!(
            "    score {} ({}) | visits {}/{} completed | progress {}%",
            row.display_score,
            row.band_label,
            row.completed_visits,
            row.visit_count,
            row.progress_percentage
        );
        match (row.last_visit_date, row.last_visit_status_label) {
            (Some(date), Some(status)) => println!(
                "    last visit {date} ({status}, {} days ago)",
                row.days_since_last_visit
            ),
            _ => println!("    last visit: none on record"),
        }
        let flags = EligibilityFlags {
            renewal: row.renewal_eligibility,
            pig_addition: row.pig_addition_eligibility,
        };
        println!("    {}", flags.summary());

        if show_components {
            for component in &row.components {
                println!(
                    "    - {}: raw {:.1} x {:.2} -> {:.2} points ({})",
                    component.factor.label(),
                    component.raw_score,
                    component.weight,
                    component.weighted_points,
                    component.notes
                );
            }
        }
    }
}

fn render_summary(summary: &PortfolioSummary) {
    println!("Portfolio summary");
    println!(
        "- {} pairs ranked | average score {:.1}",
        summary.pairs_ranked, summary.average_score
    );
    println!(
        "- bands: {} excellent, {} good, {} fair, {} poor",
        summary.band_counts.excellent,
        summary.band_counts.good,
        summary.band_counts.fair,
        summary.band_counts.poor
    );
    println!(
        "- {} renewal-eligible | {} cleared for livestock expansion",
        summary.renewal_eligible, summary.pig_addition_eligible
    );

    if summary.stale_pairs.is_empty() {
        println!("- stale pairs: none");
    } else {
        println!("- stale pairs (past the expansion recency window):");
        for stale in &summary.stale_pairs {
            println!(
                "  - {} [{}]: {} days since last visit",
                stale.association_name, stale.project_id, stale.days_since_last_visit
            );
        }
    }
}

fn render_caretakers(grouping: &CaretakerGrouping) {
    println!("Caretaker roster by association");
    for group in &grouping.groups {
        match (&group.location, group.active_members) {
            (Some(location), Some(members)) => println!(
                "- {} ({location}, {members} active members)",
                group.association_name
            ),
            (Some(location), None) => println!("- {} ({location})", group.association_name),
            _ => println!("- {}", group.association_name),
        }
        if group.members.is_empty() {
            println!("  (no caretakers resolved to this association)");
        }
        for member in &group.members {
            println!(
                "  - {} [{}] recorded as \"{}\"",
                member.name, member.match_tier, member.recorded_label
            );
        }
    }

    if grouping.unassigned.is_empty() {
        println!("Unassigned caretakers: none");
    } else {
        println!("Unassigned caretakers");
        for caretaker in &grouping.unassigned {
            match &caretaker.recorded_label {
                Some(label) => println!("  - {} (recorded label \"{label}\")", caretaker.name),
                None => println!("  - {} (no association recorded)", caretaker.name),
            }
        }
    }
}

fn render_candidates(association: &str, candidates: &[VisitCandidate]) {
    println!("Visit candidates for \"{association}\"");
    if candidates.is_empty() {
        println!("- none: no caretaker label matches this association");
    } else {
        for candidate in candidates {
            println!(
                "- {} (recorded label \"{}\")",
                candidate.name, candidate.recorded_label
            );
        }
    }
}
