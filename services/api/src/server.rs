use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryGiveawayStore};
use crate::routes::with_campaign_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use giveaway::config::AppConfig;
use giveaway::error::AppError;
use giveaway::telemetry;
use giveaway::workflows::campaign::GiveawayService;
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
        event_name: Arc::from(config.giveaway.event_name.as_str()),
    };

    let store = Arc::new(InMemoryGiveawayStore::new(
        config.giveaway.eligibility.clone(),
    ));
    let service = Arc::new(
        GiveawayService::new(store).with_default_drawn_by(config.giveaway.drawn_by.clone()),
    );

    let app = with_campaign_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        event = %config.giveaway.event_name,
        "giveaway service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
