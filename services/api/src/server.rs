use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRecordSource};
use crate::routes::with_monitoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use slp_monitor::config::AppConfig;
use slp_monitor::error::AppError;
use slp_monitor::telemetry;
use slp_monitor::workflows::monitoring::{MonitoringService, RankingEngine};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let source = match config.records.field_log.as_deref() {
        Some(path) => {
            let source = InMemoryRecordSource::from_field_log(path)?;
            info!(path = %path.display(), visits = source.visits.len(), "field log export loaded");
            source
        }
        None => InMemoryRecordSource::seeded(Local::now().date_naive()),
    };
    let service = Arc::new(MonitoringService::new(
        Arc::new(source),
        RankingEngine::default(),
    ));

    let app = with_monitoring_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "livelihood monitoring console ready");

    axum::serve(listener, app).await?;
    Ok(())
}
