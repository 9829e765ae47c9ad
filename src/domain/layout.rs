// Grid placement of dashboard components
use super::component::DashboardComponent;
use super::dashboard::{
    DashboardViewConfig, DASHBOARD_WIDTH_IN_UNITS, MAX_DASHBOARD_HEIGHT_IN_UNITS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// What happens when two components claim the same cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlapPolicy {
    /// The component later in input order takes the cell
    #[default]
    LastWriteWins,
    /// Any shared cell is a `LayoutConflict`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("component {id} has zero width or height")]
    EmptyComponent { id: Uuid },

    #[error("component {id} is {width}x{height}, below its minimum of {min_width}x{min_height}")]
    BelowMinimum {
        id: Uuid,
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("component {id} spans columns {left}..{right}, past the dashboard width of {grid_width}")]
    OutOfBounds {
        id: Uuid,
        left: u32,
        right: u64,
        grid_width: u32,
    },

    #[error("component {id} spans rows {top}..{bottom}, past the maximum height of {max_height}")]
    TooTall {
        id: Uuid,
        top: u32,
        bottom: u64,
        max_height: u32,
    },

    #[error("dashboard height {height} exceeds the maximum of {max_height}")]
    CanvasTooTall { height: u32, max_height: u32 },

    #[error("components {first} and {second} both occupy row {row}, column {col}")]
    LayoutConflict {
        row: u32,
        col: u32,
        first: Uuid,
        second: Uuid,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderCell {
    #[serde(rename_all = "camelCase")]
    Component { component_id: Uuid },
    Placeholder { row: u32, col: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderPlan {
    /// Nothing placed: the whole canvas is one placeholder
    BlankCanvas,
    /// Cells in row-major scan order
    Grid { cells: Vec<RenderCell> },
}

impl RenderPlan {
    /// Component ids in the order they are first reached by the scan
    pub fn component_order(&self) -> Vec<Uuid> {
        self.cells()
            .iter()
            .filter_map(|cell| match cell {
                RenderCell::Component { component_id } => Some(*component_id),
                RenderCell::Placeholder { .. } => None,
            })
            .collect()
    }

    /// Coordinates of every uncovered cell
    pub fn placeholders(&self) -> Vec<(u32, u32)> {
        self.cells()
            .iter()
            .filter_map(|cell| match cell {
                RenderCell::Placeholder { row, col } => Some((*row, *col)),
                RenderCell::Component { .. } => None,
            })
            .collect()
    }

    pub fn cells(&self) -> &[RenderCell] {
        match self {
            RenderPlan::BlankCanvas => &[],
            RenderPlan::Grid { cells } => cells,
        }
    }
}

struct OccupancyGrid {
    width: u32,
    rows: Vec<Vec<Option<Uuid>>>,
}

impl OccupancyGrid {
    fn new(height: u32, width: u32) -> Self {
        Self {
            width,
            rows: vec![vec![None; width as usize]; height as usize],
        }
    }

    fn ensure_rows(&mut self, height: u32) {
        while self.rows.len() < height as usize {
            self.rows.push(vec![None; self.width as usize]);
        }
    }

    fn place(&mut self, component: &DashboardComponent, policy: OverlapPolicy) -> Result<(), LayoutError> {
        self.ensure_rows(component.bottom());

        for row in component.top..component.bottom() {
            for col in component.left..component.right() {
                let cell = &mut self.rows[row as usize][col as usize];
                if let (OverlapPolicy::Reject, Some(first)) = (policy, *cell) {
                    if first != component.component_id {
                        return Err(LayoutError::LayoutConflict {
                            row,
                            col,
                            first,
                            second: component.component_id,
                        });
                    }
                }
                *cell = Some(component.component_id);
            }
        }

        Ok(())
    }

    fn scan(&self) -> Vec<RenderCell> {
        let mut seen = HashSet::new();
        let mut cells = Vec::new();

        for (row, columns) in self.rows.iter().enumerate() {
            for (col, occupant) in columns.iter().enumerate() {
                match occupant {
                    Some(id) => {
                        if seen.insert(*id) {
                            cells.push(RenderCell::Component { component_id: *id });
                        }
                    }
                    None => cells.push(RenderCell::Placeholder {
                        row: row as u32,
                        col: col as u32,
                    }),
                }
            }
        }

        cells
    }
}

fn validate_geometry(
    component: &DashboardComponent,
    grid_width: u32,
    max_height: u32,
) -> Result<(), LayoutError> {
    let id = component.component_id;

    if component.width == 0 || component.height == 0 {
        return Err(LayoutError::EmptyComponent { id });
    }

    if component.width < component.min_width || component.height < component.min_height {
        return Err(LayoutError::BelowMinimum {
            id,
            width: component.width,
            height: component.height,
            min_width: component.min_width,
            min_height: component.min_height,
        });
    }

    // widened so edges near u32::MAX cannot wrap past the checks
    let right = u64::from(component.left) + u64::from(component.width);
    if right > u64::from(grid_width) {
        return Err(LayoutError::OutOfBounds {
            id,
            left: component.left,
            right,
            grid_width,
        });
    }

    let bottom = u64::from(component.top) + u64::from(component.height);
    if bottom > u64::from(max_height) {
        return Err(LayoutError::TooTall {
            id,
            top: component.top,
            bottom,
            max_height,
        });
    }

    Ok(())
}

/// Lays components on a `height` x `grid_width` grid.
///
/// Rows are added when a component reaches below `height`, and the scan
/// covers them too. Geometry is validated before anything is placed, and
/// neither `height` nor any component may reach past
/// `MAX_DASHBOARD_HEIGHT_IN_UNITS`.
pub fn place_components(
    components: &[DashboardComponent],
    height: u32,
    grid_width: u32,
    policy: OverlapPolicy,
) -> Result<RenderPlan, LayoutError> {
    if components.is_empty() {
        return Ok(RenderPlan::BlankCanvas);
    }

    if height > MAX_DASHBOARD_HEIGHT_IN_UNITS {
        return Err(LayoutError::CanvasTooTall {
            height,
            max_height: MAX_DASHBOARD_HEIGHT_IN_UNITS,
        });
    }

    for component in components {
        validate_geometry(component, grid_width, MAX_DASHBOARD_HEIGHT_IN_UNITS)?;
    }

    let mut grid = OccupancyGrid::new(height, grid_width);
    for component in components {
        grid.place(component, policy)?;
    }

    let cells = grid.scan();
    tracing::debug!(
        "Placed {} components on {} rows, {} cells",
        components.len(),
        grid.rows.len(),
        cells.len()
    );

    Ok(RenderPlan::Grid { cells })
}

/// Lays out a dashboard view config on the fixed-width dashboard grid
pub fn plan_layout(
    config: &DashboardViewConfig,
    default_height: u32,
    policy: OverlapPolicy,
) -> Result<RenderPlan, LayoutError> {
    place_components(
        &config.components,
        config.effective_height(default_height),
        DASHBOARD_WIDTH_IN_UNITS,
        policy,
    )
}
