use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::ranking::RankingFilter;
use super::service::{MonitoringService, MonitoringServiceError};
use super::sources::RecordSource;

/// Router builder exposing the ranking engine behind plain request handlers.
/// Handlers fetch through the record source, run the pure computation, and
/// serialize views; state and time both stay outside the engine.
pub fn monitoring_router<S>(service: Arc<MonitoringService<S>>) -> Router
where
    S: RecordSource + 'static,
{
    Router::new()
        .route("/api/v1/monitoring/rankings", get(rankings_handler::<S>))
        .route("/api/v1/monitoring/summary", get(summary_handler::<S>))
        .route("/api/v1/caretakers/groups", get(groups_handler::<S>))
        .route("/api/v1/caretakers/candidates", get(candidates_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankingsQuery {
    #[serde(default)]
    pub(crate) eligibility: Option<String>,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryQuery {
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatesQuery {
    pub(crate) association: String,
}

pub(crate) async fn rankings_handler<S>(
    State(service): State<Arc<MonitoringService<S>>>,
    Query(query): Query<RankingsQuery>,
) -> Response
where
    S: RecordSource + 'static,
{
    let filter = match query.eligibility.as_deref() {
        Some(raw) => match raw.parse::<RankingFilter>() {
            Ok(filter) => filter,
            Err(message) => {
                let payload = json!({ "error": message });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
        None => RankingFilter::All,
    };
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());

    match service.ranking_rows(filter, as_of) {
        Ok(rows) => {
            let payload = json!({
                "as_of": as_of,
                "eligibility": filter.label(),
                "rankings": rows,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn summary_handler<S>(
    State(service): State<Arc<MonitoringService<S>>>,
    Query(query): Query<SummaryQuery>,
) -> Response
where
    S: RecordSource + 'static,
{
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());

    match service.summary(as_of) {
        Ok(summary) => {
            let payload = json!({ "as_of": as_of, "summary": summary });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn groups_handler<S>(
    State(service): State<Arc<MonitoringService<S>>>,
) -> Response
where
    S: RecordSource + 'static,
{
    match service.caretaker_groups() {
        Ok(grouping) => (StatusCode::OK, axum::Json(grouping)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn candidates_handler<S>(
    State(service): State<Arc<MonitoringService<S>>>,
    Query(query): Query<CandidatesQuery>,
) -> Response
where
    S: RecordSource + 'static,
{
    match service.visit_candidates(&query.association) {
        Ok(candidates) => {
            let payload = json!({
                "association": query.association,
                "candidates": candidates,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: MonitoringServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
