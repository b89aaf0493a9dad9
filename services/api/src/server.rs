use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rental_intake::config::AppConfig;
use rental_intake::error::AppError;
use rental_intake::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{build_registry, AppState};
use crate::routes::with_intake_routes;

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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = Arc::new(build_registry(&config)?);
    let _sweeper = registry.spawn_idle_sweeper();

    let app = with_intake_routes(registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        translate = %config.integrations.translate_url,
        debounce_ms = config.intake.search_debounce.as_millis() as u64,
        session_idle_ttl_secs = config.intake.session_idle_ttl.as_secs(),
        "rental intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
