// Dashboard domain model
use super::component::DashboardComponent;
use super::layout::LayoutError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed number of unit columns on every dashboard
pub const DASHBOARD_WIDTH_IN_UNITS: u32 = 12;

/// Height used when a view config does not carry one
pub const DEFAULT_DASHBOARD_HEIGHT_IN_UNITS: u32 = 60;

/// Tallest grid the layout will allocate
pub const MAX_DASHBOARD_HEIGHT_IN_UNITS: u32 = 1_000;

pub const UNTITLED_DASHBOARD: &str = "Untitled Dashboard";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewConfig {
    #[serde(default)]
    pub components: Vec<DashboardComponent>,
    #[serde(default)]
    pub height_in_units: u32,
}

impl DashboardViewConfig {
    pub fn new(height_in_units: u32) -> Self {
        Self {
            components: Vec::new(),
            height_in_units,
        }
    }

    /// Configured height, or `default` when none is set
    pub fn effective_height(&self, default: u32) -> u32 {
        if self.height_in_units == 0 {
            default
        } else {
            self.height_in_units
        }
    }

    pub fn find_component(&self, id: Uuid) -> Option<&DashboardComponent> {
        self.components.iter().find(|c| c.component_id == id)
    }

    /// Lowest occupied row edge across all components
    pub fn lowest_edge(&self) -> u32 {
        self.components.iter().map(DashboardComponent::bottom).max().unwrap_or(0)
    }

    /// Appends a component at the left edge, below everything already placed.
    /// The dashboard grows when the new component would not fit.
    pub fn add_component(&mut self, mut component: DashboardComponent, default_height: u32) {
        component.top = self.lowest_edge();
        component.left = 0;

        let height = self.effective_height(default_height);
        if component.bottom() > height {
            self.height_in_units = component.bottom();
        } else {
            self.height_in_units = height;
        }

        self.components.push(component);
    }

    /// Replaces the component with the same id. Returns false if there is none.
    pub fn update_component(&mut self, updated: DashboardComponent) -> bool {
        match self
            .components
            .iter_mut()
            .find(|c| c.component_id == updated.component_id)
        {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove_component(&mut self, id: Uuid) -> bool {
        let before = self.components.len();
        self.components.retain(|c| c.component_id != id);
        self.components.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub view_config: Option<DashboardViewConfig>,
}

impl Dashboard {
    pub fn new(id: Uuid, name: Option<String>, view_config: Option<DashboardViewConfig>) -> Self {
        Self {
            id,
            name,
            description: None,
            view_config,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNTITLED_DASHBOARD)
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("dashboard {0} not found")]
    NotFound(Uuid),

    #[error("component {0} not found")]
    ComponentNotFound(Uuid),

    #[error("no component is selected")]
    NothingSelected,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
