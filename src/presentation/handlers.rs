// HTTP request handlers
use crate::application::dashboard_service::LoadedDashboard;
use crate::domain::chart::ChartDescriptor;
use crate::domain::component::{ComponentArgument, ComponentKind, DashboardComponent};
use crate::domain::dashboard::DashboardViewConfig;
use crate::domain::metrics::{MetricCatalog, MetricViewData};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultComponentResponse {
    pub component: DashboardComponent,
    pub arguments: Vec<ComponentArgument>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Fresh component of the given kind with its settings schema
pub async fn default_component(
    Path(kind): Path<String>,
) -> Result<Json<DefaultComponentResponse>, ApiError> {
    let kind: ComponentKind = kind.parse()?;
    Ok(Json(DefaultComponentResponse {
        component: DashboardComponent::new_default(kind),
        arguments: kind.config_arguments(),
    }))
}

/// Dashboard with its computed layout
pub async fn get_dashboard(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LoadedDashboard>, ApiError> {
    Ok(Json(state.dashboard_service.load(id).await?))
}

pub async fn save_view_config(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(config): Json<DashboardViewConfig>,
) -> Result<StatusCode, ApiError> {
    state.dashboard_service.save(id, &config).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn metric_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricCatalog>, ApiError> {
    Ok(Json(state.metric_view_service.load_catalog().await?))
}

/// Runs every query of a metric view and returns the charts
pub async fn render_charts(
    State(state): State<Arc<AppState>>,
    Json(view): Json<MetricViewData>,
) -> Result<Json<Vec<ChartDescriptor>>, ApiError> {
    let charts = state
        .metric_view_service
        .render_charts(&view, chrono::Utc::now())
        .await?;
    Ok(Json(charts))
}
