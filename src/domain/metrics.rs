// Metric query configuration and aggregated result models
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum AggregationType {
    #[default]
    Avg,
    Sum,
    Count,
    Max,
    Min,
}

impl AggregationType {
    /// Unrecognized names fall back to `Avg`
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "avg" | "average" => AggregationType::Avg,
            "sum" => AggregationType::Sum,
            "count" => AggregationType::Count,
            "max" => AggregationType::Max,
            "min" => AggregationType::Min,
            other => {
                tracing::warn!("Unknown aggregation type {:?}, using Avg", other);
                AggregationType::Avg
            }
        }
    }
}

impl<'de> Deserialize<'de> for AggregationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlias {
    pub variable: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQuery {
    #[serde(default)]
    pub metric_name: Option<String>,
    #[serde(default)]
    pub aggregation_type: AggregationType,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub group_by: Vec<String>,
}

/// Names the series a single aggregated point belongs to
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesNaming {
    /// Series named after the value of one group-by attribute
    Attribute(String),
    /// In-process namer; never serialized
    #[serde(skip)]
    Custom(Arc<dyn Fn(&AggregatedPoint) -> String + Send + Sync>),
}

impl SeriesNaming {
    pub fn custom<F>(namer: F) -> Self
    where
        F: Fn(&AggregatedPoint) -> String + Send + Sync + 'static,
    {
        SeriesNaming::Custom(Arc::new(namer))
    }

    pub fn name_for(&self, point: &AggregatedPoint) -> String {
        match self {
            SeriesNaming::Attribute(attribute) => match point.group_by.get(attribute) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            },
            SeriesNaming::Custom(namer) => namer(point),
        }
    }
}

impl fmt::Debug for SeriesNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesNaming::Attribute(attribute) => f.debug_tuple("Attribute").field(attribute).finish(),
            SeriesNaming::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricQueryConfig {
    pub alias: MetricAlias,
    #[serde(default)]
    pub query: MetricQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_naming: Option<SeriesNaming>,
}

impl MetricQueryConfig {
    pub fn empty(variable: String) -> Self {
        Self {
            alias: MetricAlias {
                variable,
                ..MetricAlias::default()
            },
            ..Self::default()
        }
    }

    /// Alias title, then metric name, then empty
    pub fn display_title(&self) -> String {
        if !self.alias.title.is_empty() {
            return self.alias.title.clone();
        }
        self.query.metric_name.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default)]
    pub group_by: Map<String, Value>,
}

impl AggregatedPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            group_by: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedResult {
    #[serde(default)]
    pub data: Vec<AggregatedPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn last_hours(end: DateTime<Utc>, hours: i64) -> Self {
        Self::new(end - Duration::hours(hours), end)
    }

    pub fn spans_at_most_a_day(&self) -> bool {
        self.end - self.start <= Duration::hours(24)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNameAndUnit {
    pub metric_name: String,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCatalog {
    pub metric_names_and_units: Vec<MetricNameAndUnit>,
    pub telemetry_attributes: Vec<String>,
}

impl MetricCatalog {
    pub fn unit_for(&self, metric_name: &str) -> Option<&str> {
        self.metric_names_and_units
            .iter()
            .find(|m| m.metric_name == metric_name)
            .and_then(|m| m.unit.as_deref())
    }
}

/// Spreadsheet-style query variable: a..z, then aa, ab, ...
pub fn query_variable(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|b| *b as char).collect()
}

/// The queries behind one metric view, plus the window they cover
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricViewData {
    #[serde(default)]
    pub query_configs: Vec<MetricQueryConfig>,
    #[serde(default)]
    pub window: Option<TimeWindow>,
}

impl MetricViewData {
    /// Appends an empty Avg query under the next free variable
    pub fn add_query(&mut self) -> &MetricQueryConfig {
        let mut index = self.query_configs.len();
        let variable = loop {
            let candidate = query_variable(index);
            if !self.query_configs.iter().any(|q| q.alias.variable == candidate) {
                break candidate;
            }
            index += 1;
        };

        self.query_configs.push(MetricQueryConfig::empty(variable));
        &self.query_configs[self.query_configs.len() - 1]
    }

    pub fn update_query(&mut self, index: usize, config: MetricQueryConfig) -> bool {
        match self.query_configs.get_mut(index) {
            Some(slot) => {
                *slot = config;
                true
            }
            None => false,
        }
    }

    pub fn remove_query(&mut self, index: usize) -> bool {
        if index < self.query_configs.len() {
            self.query_configs.remove(index);
            true
        } else {
            false
        }
    }

    pub fn set_window(&mut self, window: Option<TimeWindow>) {
        self.window = window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_aggregation_type_fallback() {
        let parsed: AggregationType = serde_json::from_str("\"Sum\"").unwrap();
        assert_eq!(parsed, AggregationType::Sum);
        let parsed: AggregationType = serde_json::from_str("\"count\"").unwrap();
        assert_eq!(parsed, AggregationType::Count);
        let parsed: AggregationType = serde_json::from_str("\"p99\"").unwrap();
        assert_eq!(parsed, AggregationType::Avg);
    }

    #[test]
    fn test_query_variable() {
        assert_eq!(query_variable(0), "a");
        assert_eq!(query_variable(25), "z");
        assert_eq!(query_variable(26), "aa");
        assert_eq!(query_variable(27), "ab");
        assert_eq!(query_variable(52), "ba");
    }

    #[test]
    fn test_add_query_skips_used_variables() {
        let mut view = MetricViewData::default();
        view.add_query();
        view.add_query();
        view.add_query();
        assert!(view.remove_query(0));

        // "b" and "c" remain; next free from index 2 is "d"
        let added = view.add_query();
        assert_eq!(added.alias.variable, "d");
        assert_eq!(added.query.aggregation_type, AggregationType::Avg);
    }

    #[test]
    fn test_update_and_remove_out_of_range() {
        let mut view = MetricViewData::default();
        view.add_query();
        assert!(!view.update_query(3, MetricQueryConfig::empty("x".into())));
        assert!(!view.remove_query(1));
        assert!(view.update_query(0, MetricQueryConfig::empty("x".into())));
        assert_eq!(view.query_configs[0].alias.variable, "x");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut config = MetricQueryConfig::empty("a".into());
        assert_eq!(config.display_title(), "");
        config.query.metric_name = Some("cpu".into());
        assert_eq!(config.display_title(), "cpu");
        config.alias.title = "CPU usage".into();
        assert_eq!(config.display_title(), "CPU usage");
    }

    #[test]
    fn test_series_naming() {
        let mut point = AggregatedPoint::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 1.0);
        point.group_by.insert("host".into(), Value::String("web-1".into()));
        point.group_by.insert("shard".into(), Value::from(3));

        assert_eq!(SeriesNaming::Attribute("host".into()).name_for(&point), "web-1");
        assert_eq!(SeriesNaming::Attribute("shard".into()).name_for(&point), "3");
        assert_eq!(SeriesNaming::Attribute("zone".into()).name_for(&point), "");

        let namer = SeriesNaming::custom(|p| format!("v{}", p.value));
        assert_eq!(namer.name_for(&point), "v1");
    }

    #[test]
    fn test_window_span() {
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert!(TimeWindow::last_hours(end, 24).spans_at_most_a_day());
        assert!(!TimeWindow::new(end - Duration::hours(24) - Duration::seconds(1), end).spans_at_most_a_day());
    }

    #[test]
    fn test_catalog_unit_lookup() {
        let catalog = MetricCatalog {
            metric_names_and_units: vec![
                MetricNameAndUnit { metric_name: "latency".into(), unit: Some("ms".into()) },
                MetricNameAndUnit { metric_name: "requests".into(), unit: None },
            ],
            telemetry_attributes: vec![],
        };
        assert_eq!(catalog.unit_for("latency"), Some("ms"));
        assert_eq!(catalog.unit_for("requests"), None);
        assert_eq!(catalog.unit_for("missing"), None);
    }

    #[test]
    fn test_query_config_from_json() {
        let config: MetricQueryConfig = serde_json::from_value(serde_json::json!({
            "alias": { "variable": "a", "title": "Latency" },
            "query": { "metricName": "latency", "aggregationType": "Max", "groupBy": ["host"] },
            "seriesNaming": { "attribute": "host" }
        }))
        .unwrap();

        assert_eq!(config.query.aggregation_type, AggregationType::Max);
        assert_eq!(config.query.group_by, vec!["host".to_string()]);
        assert!(matches!(config.series_naming, Some(SeriesNaming::Attribute(ref a)) if a == "host"));
    }
}
