use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use slp_monitor::error::AppError;
use slp_monitor::workflows::caretakers::AssociationDirectory;
use slp_monitor::workflows::fieldlog::FieldLogImporter;
use slp_monitor::workflows::monitoring::{
    aggregate_visits, monitoring_router, rank_groups, MonitoringService, PortfolioSummary,
    RankingEngine, RankingRow, RecordSource,
};
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct FieldReportRequest {
    /// Raw field-log CSV export, pasted as-is.
    pub(crate) field_log_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldReportResponse {
    pub(crate) as_of: NaiveDate,
    pub(crate) visits_imported: usize,
    pub(crate) rankings: Vec<RankingRow>,
    pub(crate) summary: PortfolioSummary,
}

pub(crate) fn with_monitoring_routes<S>(service: Arc<MonitoringService<S>>) -> axum::Router
where
    S: RecordSource + 'static,
{
    monitoring_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/monitoring/report",
            axum::routing::post(field_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// One-shot ranking preview for a pasted export. The export carries no
/// canonical records, so rows go out without directory enrichment.
pub(crate) async fn field_report_endpoint(
    Json(payload): Json<FieldReportRequest>,
) -> Result<Json<FieldReportResponse>, AppError> {
    let FieldReportRequest {
        field_log_csv,
        as_of,
    } = payload;

    let reader = Cursor::new(field_log_csv.into_bytes());
    let visits = FieldLogImporter::from_reader(reader)?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    let engine = RankingEngine::default();
    let stale_after_days = engine.eligibility_config().expansion_max_days_since_visit;
    let groups = aggregate_visits(&visits, as_of);
    let rankings = rank_groups(&groups, &engine);

    let directory = AssociationDirectory::from_projects(&[]);
    let rows = rankings
        .iter()
        .enumerate()
        .map(|(position, ranking)| RankingRow::from_ranking(position + 1, ranking, &directory))
        .collect();
    let summary = PortfolioSummary::from_rankings(&rankings, stale_after_days);

    Ok(Json(FieldReportResponse {
        as_of,
        visits_imported: visits.len(),
        rankings: rows,
        summary,
    }))
}
