use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRecommendationRepository};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_ai::config::AppConfig;
use scholar_ai::error::AppError;
use scholar_ai::telemetry;
use scholar_ai::workflows::matching::{
    HttpModelClient, MatchingService, RecommendationCache,
};
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

    let repository = Arc::new(InMemoryRecommendationRepository::default());
    let client = Arc::new(HttpModelClient::new(config.model.clone()));
    let cache = RecommendationCache::new(config.cache.ttl, config.cache.capacity);
    let matching_service = Arc::new(MatchingService::with_cache(client, repository, cache));

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, model = %config.model.model, "scholarship matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
