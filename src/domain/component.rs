// Dashboard component kinds and placed components
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Chart,
    Value,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitSize {
    pub width: u32,
    pub height: u32,
}

impl UnitSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentInputType {
    MetricsQueryConfig,
    Text,
}

/// One configurable argument a component exposes in its settings panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentArgument {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub input_type: ComponentInputType,
}

impl ComponentArgument {
    fn new(id: &str, name: &str, description: &str, input_type: ComponentInputType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            input_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component kind: {0}")]
pub struct UnknownComponentKind(pub String);

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [ComponentKind::Chart, ComponentKind::Value, ComponentKind::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Chart => "chart",
            ComponentKind::Value => "value",
            ComponentKind::Text => "text",
        }
    }

    /// Size a freshly added component gets
    pub fn default_size(self) -> UnitSize {
        match self {
            ComponentKind::Chart => UnitSize::new(12, 6),
            ComponentKind::Value => UnitSize::new(3, 1),
            ComponentKind::Text => UnitSize::new(3, 1),
        }
    }

    /// Smallest size a component may be resized to
    pub fn min_size(self) -> UnitSize {
        match self {
            ComponentKind::Chart => UnitSize::new(6, 3),
            ComponentKind::Value => UnitSize::new(1, 1),
            ComponentKind::Text => UnitSize::new(1, 1),
        }
    }

    pub fn config_arguments(self) -> Vec<ComponentArgument> {
        match self {
            ComponentKind::Chart => vec![ComponentArgument::new(
                "metricQueryConfig",
                "Chart Configuration",
                "Please select the metrics to display on the chart",
                ComponentInputType::MetricsQueryConfig,
            )],
            ComponentKind::Value => vec![ComponentArgument::new(
                "metricsViewConfig",
                "Metrics",
                "Please select the metrics to display on the chart",
                ComponentInputType::MetricsQueryConfig,
            )],
            ComponentKind::Text => vec![ComponentArgument::new(
                "text",
                "Text",
                "Please enter the text to display",
                ComponentInputType::Text,
            )],
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownComponentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownComponentKind(s.to_string()))
    }
}

/// A rectangle on the dashboard grid, in whole dashboard units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardComponent {
    pub component_id: Uuid,
    pub kind: ComponentKind,
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl DashboardComponent {
    pub fn new_default(kind: ComponentKind) -> Self {
        let size = kind.default_size();
        let min = kind.min_size();
        Self {
            component_id: Uuid::new_v4(),
            kind,
            top: 0,
            left: 0,
            width: size.width,
            height: size.height,
            min_width: min.width,
            min_height: min.height,
            arguments: Map::new(),
        }
    }

    /// First row below the component, saturating at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    /// First column right of the component, saturating at `u32::MAX`
    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }
}
