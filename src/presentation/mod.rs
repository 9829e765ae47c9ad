// Presentation layer - HTTP routes and handlers
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/components/:kind/default", get(handlers::default_component))
        .route("/dashboards/:id", get(handlers::get_dashboard))
        .route("/dashboards/:id/view-config", put(handlers::save_view_config))
        .route("/metrics/catalog", get(handlers::metric_catalog))
        .route("/metrics/charts", post(handlers::render_charts))
        .with_state(state)
}
