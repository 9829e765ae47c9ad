// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::metric_view_service::MetricViewService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub metric_view_service: MetricViewService,
}
