// HTTP error mapping
use crate::application::metric_view_service::MetricViewError;
use crate::domain::component::UnknownComponentKind;
use crate::domain::dashboard::DashboardError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    MetricView(#[from] MetricViewError),

    #[error(transparent)]
    UnknownKind(#[from] UnknownComponentKind),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Dashboard(DashboardError::NotFound(_))
            | ApiError::Dashboard(DashboardError::ComponentNotFound(_))
            | ApiError::UnknownKind(_) => StatusCode::NOT_FOUND,
            ApiError::Dashboard(DashboardError::NothingSelected)
            | ApiError::Dashboard(DashboardError::Layout(_))
            | ApiError::MetricView(MetricViewError::MissingMetricName { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Dashboard(DashboardError::Upstream(_))
            | ApiError::MetricView(MetricViewError::Aggregation { .. })
            | ApiError::MetricView(MetricViewError::Catalog(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::LayoutError;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(ApiError::from(DashboardError::NotFound(id)).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(DashboardError::Layout(LayoutError::EmptyComponent { id })).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DashboardError::Upstream(anyhow::anyhow!("down"))).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(MetricViewError::MissingMetricName { variable: "a".into() }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(UnknownComponentKind("gauge".into())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_message_passes_through() {
        let id = Uuid::new_v4();
        let err = ApiError::from(DashboardError::NotFound(id));
        assert_eq!(err.to_string(), format!("dashboard {} not found", id));
    }
}
