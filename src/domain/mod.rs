// Domain layer - Pure dashboard and metrics models
pub mod chart;
pub mod component;
pub mod dashboard;
pub mod layout;
pub mod metrics;
