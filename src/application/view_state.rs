// Dashboard view state and its reducer
use crate::domain::component::{ComponentKind, DashboardComponent};
use crate::domain::dashboard::{DashboardError, DashboardViewConfig};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Width of the component settings panel while it is open
pub const SIDE_PANEL_WIDTH_PX: u32 = 650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardMode {
    #[default]
    View,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViewState {
    pub mode: DashboardMode,
    pub config: DashboardViewConfig,
    pub selected: Option<Uuid>,
    pub is_saving: bool,
    pub is_full_screen: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Edit,
    CancelEdit,
    SaveStarted,
    SaveFinished(Result<(), String>),
    EnterFullScreen,
    ExitFullScreen,
    ConfigLoaded(DashboardViewConfig),
    AddComponent(ComponentKind),
    SelectComponent(Uuid),
    UnselectComponent,
    UpdateComponent(DashboardComponent),
    DeleteSelectedComponent,
}

impl DashboardViewState {
    pub fn new(config: DashboardViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.mode == DashboardMode::Edit
    }

    pub fn side_panel_width(&self) -> u32 {
        if self.is_edit_mode() && self.selected.is_some() {
            SIDE_PANEL_WIDTH_PX
        } else {
            0
        }
    }
}

/// Applies one action and returns the next state; `state` is left untouched.
///
/// `default_height` is the dashboard height used when the config has none.
pub fn reduce(
    state: &DashboardViewState,
    action: DashboardAction,
    default_height: u32,
) -> Result<DashboardViewState, DashboardError> {
    let mut next = state.clone();

    match action {
        DashboardAction::Edit => next.mode = DashboardMode::Edit,
        DashboardAction::CancelEdit => next.mode = DashboardMode::View,
        DashboardAction::SaveStarted => {
            next.is_saving = true;
            next.mode = DashboardMode::View;
        }
        DashboardAction::SaveFinished(outcome) => {
            next.is_saving = false;
            next.error = outcome.err();
        }
        DashboardAction::EnterFullScreen => next.is_full_screen = true,
        DashboardAction::ExitFullScreen => next.is_full_screen = false,
        DashboardAction::ConfigLoaded(config) => {
            next.config = config;
            next.selected = None;
        }
        DashboardAction::AddComponent(kind) => {
            next.config
                .add_component(DashboardComponent::new_default(kind), default_height);
        }
        DashboardAction::SelectComponent(id) => {
            if next.config.find_component(id).is_none() {
                return Err(DashboardError::ComponentNotFound(id));
            }
            next.selected = Some(id);
        }
        DashboardAction::UnselectComponent => next.selected = None,
        DashboardAction::UpdateComponent(component) => {
            let id = component.component_id;
            if !next.config.update_component(component) {
                return Err(DashboardError::ComponentNotFound(id));
            }
        }
        DashboardAction::DeleteSelectedComponent => {
            let id = next.selected.take().ok_or(DashboardError::NothingSelected)?;
            if !next.config.remove_component(id) {
                return Err(DashboardError::ComponentNotFound(id));
            }
        }
    }

    Ok(next)
}
