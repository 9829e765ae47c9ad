// Chart descriptor models handed to the rendering layer
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: DateTime<Utc>, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(name: String, points: Vec<ChartPoint>) -> Self {
        Self { name, points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartCurve {
    Linear,
}

/// Time-of-day ticks for short windows, calendar dates for long ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum XAxisKind {
    Time,
    Date,
}

/// How the renderer folds points that share an x bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum XAxisAggregate {
    Average,
    Sum,
    Max,
    Min,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    pub legend: String,
    pub kind: XAxisKind,
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
    pub aggregate: XAxisAggregate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum YAxisKind {
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum YAxisPrecision {
    NoDecimals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxis {
    pub legend: String,
    pub kind: YAxisKind,
    pub precision: YAxisPrecision,
    pub unit: Option<String>,
}

impl YAxis {
    pub fn numeric(unit: Option<String>) -> Self {
        Self {
            legend: String::new(),
            kind: YAxisKind::Number,
            precision: YAxisPrecision::NoDecimals,
            unit,
        }
    }

    /// Tick label: the value followed by the metric's unit
    pub fn format(&self, value: f64) -> String {
        format!("{} {}", value, self.unit.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub description: String,
    pub series: Vec<ChartSeries>,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
    pub curve: ChartCurve,
    pub sync: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_axis_format() {
        assert_eq!(YAxis::numeric(Some("ms".into())).format(42.0), "42 ms");
        assert_eq!(YAxis::numeric(None).format(7.0), "7 ");
    }
}
