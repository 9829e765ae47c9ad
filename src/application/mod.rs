// Application layer - Use cases over the model API
pub mod chart_builder;
pub mod dashboard_service;
pub mod metric_view_service;
pub mod metrics_repository;
pub mod view_state;
