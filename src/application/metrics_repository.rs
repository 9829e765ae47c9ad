// Repository traits for the external model API
use crate::domain::dashboard::{Dashboard, DashboardViewConfig};
use crate::domain::metrics::{
    AggregatedResult, AggregationType, MetricNameAndUnit, MetricQueryConfig, TimeWindow,
};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Upper bound on aggregated rows returned per query
pub const LIMIT_PER_PROJECT: u32 = 10_000;

/// One aggregation call against the analytics API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    pub metric_name: String,
    pub attributes: Map<String, Value>,
    pub aggregation_type: AggregationType,
    pub window: TimeWindow,
    pub aggregate_column: String,
    pub timestamp_column: String,
    pub limit: u32,
    pub skip: u32,
    pub group_by: Vec<String>,
}

impl AggregateRequest {
    pub fn for_query(metric_name: String, config: &MetricQueryConfig, window: TimeWindow) -> Self {
        Self {
            metric_name,
            attributes: config.query.attributes.clone(),
            aggregation_type: config.query.aggregation_type,
            window,
            aggregate_column: "value".to_string(),
            timestamp_column: "time".to_string(),
            limit: LIMIT_PER_PROJECT,
            skip: 0,
            group_by: config.query.group_by.clone(),
        }
    }
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Aggregated time series for one query
    async fn aggregate(&self, request: &AggregateRequest) -> anyhow::Result<AggregatedResult>;

    /// Every known metric with its unit
    async fn list_metric_names_and_units(&self) -> anyhow::Result<Vec<MetricNameAndUnit>>;

    /// Attribute keys that can be filtered or grouped on
    async fn list_telemetry_attributes(&self) -> anyhow::Result<Vec<String>>;
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn get_dashboard(&self, id: Uuid) -> anyhow::Result<Option<Dashboard>>;

    async fn update_view_config(&self, id: Uuid, config: &DashboardViewConfig) -> anyhow::Result<()>;
}
