// REST model API client implementation
use crate::application::metrics_repository::{
    AggregateRequest, DashboardRepository, MetricsRepository,
};
use crate::domain::dashboard::{Dashboard, DashboardViewConfig};
use crate::domain::metrics::{AggregatedResult, MetricNameAndUnit};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct HttpModelApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateViewConfig<'a> {
    dashboard_view_config: &'a DashboardViewConfig,
}

impl HttpModelApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to model API", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model API {} request failed with status {}: {}", what, status, body);
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self.send(self.client.get(self.url(path)), what).await?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse model API {} response", what))
    }
}

#[async_trait]
impl MetricsRepository for HttpModelApi {
    async fn aggregate(&self, request: &AggregateRequest) -> Result<AggregatedResult> {
        tracing::debug!(
            "Aggregating {} ({:?}) from {} to {}",
            request.metric_name,
            request.aggregation_type,
            request.window.start,
            request.window.end
        );

        let response = self
            .send(
                self.client
                    .post(self.url("analytics/metric/aggregate"))
                    .json(request),
                "aggregate",
            )
            .await?;

        response
            .json::<AggregatedResult>()
            .await
            .context("Failed to parse aggregate response")
    }

    async fn list_metric_names_and_units(&self) -> Result<Vec<MetricNameAndUnit>> {
        let list: ListResponse<MetricNameAndUnit> =
            self.get_json("metric/catalog", "metric catalog").await?;
        Ok(list.data)
    }

    async fn list_telemetry_attributes(&self) -> Result<Vec<String>> {
        let list: ListResponse<String> = self
            .get_json("metric/attributes", "telemetry attributes")
            .await?;
        Ok(list.data)
    }
}

#[async_trait]
impl DashboardRepository for HttpModelApi {
    async fn get_dashboard(&self, id: Uuid) -> Result<Option<Dashboard>> {
        let response = self
            .authorize(self.client.get(self.url(&format!("dashboard/{}", id))))
            .send()
            .await
            .context("Failed to send dashboard request to model API")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model API dashboard request failed with status {}: {}", status, body);
        }

        let dashboard = response
            .json::<Dashboard>()
            .await
            .context("Failed to parse dashboard response")?;
        Ok(Some(dashboard))
    }

    async fn update_view_config(&self, id: Uuid, config: &DashboardViewConfig) -> Result<()> {
        let body = UpdateViewConfig {
            dashboard_view_config: config,
        };
        self.send(
            self.client
                .put(self.url(&format!("dashboard/{}", id)))
                .json(&body),
            "dashboard update",
        )
        .await?;
        Ok(())
    }
}
