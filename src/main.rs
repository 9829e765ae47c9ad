// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use metrics_dashboard::application::dashboard_service::DashboardService;
use metrics_dashboard::application::metric_view_service::MetricViewService;
use metrics_dashboard::infrastructure::config::load_app_config;
use metrics_dashboard::infrastructure::model_api::HttpModelApi;
use metrics_dashboard::presentation::{app_state::AppState, router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create model API client (infrastructure layer)
    let model_api = Arc::new(HttpModelApi::new(
        config.model_api.base_url,
        config.model_api.token,
    ));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(
        model_api.clone(),
        config.dashboard.default_height_in_units,
        config.dashboard.overlap_policy,
    );
    let metric_view_service = MetricViewService::new(model_api);

    let state = Arc::new(AppState {
        dashboard_service,
        metric_view_service,
    });

    // Build router (presentation layer)
    let app = router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting metrics-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
