// Metric view service - Fetches aggregates and turns them into charts
use crate::application::chart_builder::{build_charts, round_result};
use crate::application::metrics_repository::{AggregateRequest, MetricsRepository};
use crate::domain::chart::ChartDescriptor;
use crate::domain::metrics::{AggregatedResult, MetricCatalog, MetricViewData};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricViewError {
    #[error("query {variable} has no metric selected")]
    MissingMetricName { variable: String },

    #[error("failed to aggregate query {variable}: {source:#}")]
    Aggregation { variable: String, source: anyhow::Error },

    #[error("failed to load metric catalog: {0:#}")]
    Catalog(anyhow::Error),
}

#[derive(Clone)]
pub struct MetricViewService {
    repository: Arc<dyn MetricsRepository>,
}

impl MetricViewService {
    pub fn new(repository: Arc<dyn MetricsRepository>) -> Self {
        Self { repository }
    }

    /// Fetches one result per query, in order, one request at a time.
    ///
    /// Values are rounded to whole numbers. The first failure aborts the
    /// pass, so callers never see a partial result list.
    pub async fn fetch_aggregated_results(
        &self,
        view: &MetricViewData,
    ) -> Result<Vec<AggregatedResult>, MetricViewError> {
        let Some(window) = view.window else {
            tracing::debug!("No time window selected, skipping aggregation");
            return Ok(Vec::new());
        };

        let mut results = Vec::with_capacity(view.query_configs.len());
        for config in &view.query_configs {
            let variable = config.alias.variable.clone();
            let metric_name = config
                .query
                .metric_name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| MetricViewError::MissingMetricName {
                    variable: variable.clone(),
                })?;

            let request = AggregateRequest::for_query(metric_name, config, window);
            let mut result = self
                .repository
                .aggregate(&request)
                .await
                .map_err(|source| MetricViewError::Aggregation {
                    variable: variable.clone(),
                    source,
                })?;

            tracing::debug!(
                "Query {} ({}) returned {} points",
                variable,
                request.metric_name,
                result.data.len()
            );

            round_result(&mut result);
            results.push(result);
        }

        Ok(results)
    }

    pub async fn load_catalog(&self) -> Result<MetricCatalog, MetricViewError> {
        let metric_names_and_units = self
            .repository
            .list_metric_names_and_units()
            .await
            .map_err(MetricViewError::Catalog)?;
        let telemetry_attributes = self
            .repository
            .list_telemetry_attributes()
            .await
            .map_err(MetricViewError::Catalog)?;

        Ok(MetricCatalog {
            metric_names_and_units,
            telemetry_attributes,
        })
    }

    pub async fn render_charts(
        &self,
        view: &MetricViewData,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChartDescriptor>, MetricViewError> {
        let catalog = self.load_catalog().await?;
        let results = self.fetch_aggregated_results(view).await?;

        Ok(build_charts(
            &view.query_configs,
            &results,
            view.window.as_ref(),
            now,
            &catalog,
        ))
    }
}
