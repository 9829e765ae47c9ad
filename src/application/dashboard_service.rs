// Dashboard service - Loading and saving dashboard layouts
use crate::application::metrics_repository::DashboardRepository;
use crate::domain::dashboard::{DashboardError, DashboardViewConfig};
use crate::domain::layout::{plan_layout, OverlapPolicy, RenderPlan};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// A dashboard with defaults filled in and its layout computed.
///
/// A stored config that cannot be laid out still loads: `layout` is then
/// `None` and `layout_error` says why, so the dashboard can be repaired.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedDashboard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub view_config: DashboardViewConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<RenderPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_error: Option<String>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
    default_height: u32,
    overlap_policy: OverlapPolicy,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        default_height: u32,
        overlap_policy: OverlapPolicy,
    ) -> Self {
        Self {
            repository,
            default_height,
            overlap_policy,
        }
    }

    pub fn default_view_config(&self) -> DashboardViewConfig {
        DashboardViewConfig::new(self.default_height)
    }

    pub fn layout(&self, config: &DashboardViewConfig) -> Result<RenderPlan, DashboardError> {
        Ok(plan_layout(config, self.default_height, self.overlap_policy)?)
    }

    pub async fn load(&self, id: Uuid) -> Result<LoadedDashboard, DashboardError> {
        let dashboard = self
            .repository
            .get_dashboard(id)
            .await?
            .ok_or(DashboardError::NotFound(id))?;

        let name = dashboard.display_name().to_string();
        let view_config = dashboard
            .view_config
            .unwrap_or_else(|| self.default_view_config());
        // overlap checks only gate saves; stored overlaps resolve last-write-wins
        let (layout, layout_error) =
            match plan_layout(&view_config, self.default_height, OverlapPolicy::LastWriteWins) {
                Ok(plan) => (Some(plan), None),
                Err(e) => {
                    tracing::warn!("Stored layout for dashboard {} is invalid: {}", id, e);
                    (None, Some(e.to_string()))
                }
            };

        tracing::debug!(
            "Loaded dashboard {} with {} components",
            id,
            view_config.components.len()
        );

        Ok(LoadedDashboard {
            id,
            name,
            description: dashboard.description.unwrap_or_default(),
            view_config,
            layout,
            layout_error,
        })
    }

    /// Validates the layout, then persists the view config
    pub async fn save(&self, id: Uuid, config: &DashboardViewConfig) -> Result<(), DashboardError> {
        if let Err(e) = self.layout(config) {
            tracing::warn!("Rejected layout for dashboard {}: {}", id, e);
            return Err(e);
        }

        self.repository.update_view_config(id, config).await?;
        tracing::debug!("Saved dashboard {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::component::{ComponentKind, DashboardComponent};
    use crate::domain::dashboard::{Dashboard, UNTITLED_DASHBOARD};
    use crate::domain::layout::LayoutError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeDashboards {
        dashboards: Mutex<HashMap<Uuid, Dashboard>>,
    }

    #[async_trait]
    impl DashboardRepository for FakeDashboards {
        async fn get_dashboard(&self, id: Uuid) -> anyhow::Result<Option<Dashboard>> {
            Ok(self.dashboards.lock().unwrap().get(&id).cloned())
        }

        async fn update_view_config(&self, id: Uuid, config: &DashboardViewConfig) -> anyhow::Result<()> {
            let mut dashboards = self.dashboards.lock().unwrap();
            let dashboard = dashboards
                .get_mut(&id)
                .ok_or_else(|| anyhow::anyhow!("no dashboard {}", id))?;
            dashboard.view_config = Some(config.clone());
            Ok(())
        }
    }

    fn service_with(dashboard: Dashboard, policy: OverlapPolicy) -> (DashboardService, Arc<FakeDashboards>) {
        let repo = Arc::new(FakeDashboards::default());
        repo.dashboards.lock().unwrap().insert(dashboard.id, dashboard);
        (DashboardService::new(repo.clone(), 4, policy), repo)
    }

    #[tokio::test]
    async fn test_load_fills_defaults() {
        let id = Uuid::new_v4();
        let (service, _) = service_with(Dashboard::new(id, None, None), OverlapPolicy::LastWriteWins);

        let loaded = service.load(id).await.unwrap();
        assert_eq!(loaded.name, UNTITLED_DASHBOARD);
        assert_eq!(loaded.description, "");
        assert_eq!(loaded.view_config, DashboardViewConfig::new(4));
        assert_eq!(loaded.layout, Some(RenderPlan::BlankCanvas));
        assert_eq!(loaded.layout_error, None);
    }

    #[tokio::test]
    async fn test_load_missing_dashboard() {
        let (service, _) = service_with(Dashboard::new(Uuid::new_v4(), None, None), OverlapPolicy::LastWriteWins);
        let missing = Uuid::new_v4();

        let err = service.load(missing).await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let id = Uuid::new_v4();
        let (service, repo) = service_with(
            Dashboard::new(id, Some("Ops".into()), None),
            OverlapPolicy::LastWriteWins,
        );

        let mut config = service.default_view_config();
        config.add_component(DashboardComponent::new_default(ComponentKind::Value), 4);
        service.save(id, &config).await.unwrap();

        let stored = repo.dashboards.lock().unwrap()[&id].view_config.clone();
        assert_eq!(stored, Some(config.clone()));

        let loaded = service.load(id).await.unwrap();
        assert_eq!(loaded.name, "Ops");
        let layout = loaded.layout.unwrap();
        assert_eq!(layout.component_order(), vec![config.components[0].component_id]);
        assert_eq!(layout.placeholders().len(), 4 * 12 - 3);
    }

    #[tokio::test]
    async fn test_save_rejects_bad_layout() {
        let id = Uuid::new_v4();
        let (service, repo) = service_with(Dashboard::new(id, None, None), OverlapPolicy::Reject);

        let mut config = service.default_view_config();
        config.components.push(DashboardComponent::new_default(ComponentKind::Value));
        config.components.push(DashboardComponent::new_default(ComponentKind::Value));

        let err = service.save(id, &config).await.unwrap_err();
        assert!(matches!(err, DashboardError::Layout(LayoutError::LayoutConflict { row: 0, col: 0, .. })));
        assert_eq!(repo.dashboards.lock().unwrap()[&id].view_config, None);
    }

    #[tokio::test]
    async fn test_load_overlapping_config_under_reject() {
        let id = Uuid::new_v4();
        let first = DashboardComponent::new_default(ComponentKind::Value);
        let second = DashboardComponent::new_default(ComponentKind::Value);
        let mut stored = DashboardViewConfig::new(4);
        stored.components = vec![first, second.clone()];
        let (service, _) = service_with(
            Dashboard::new(id, None, Some(stored.clone())),
            OverlapPolicy::Reject,
        );

        let loaded = service.load(id).await.unwrap();
        assert_eq!(loaded.view_config, stored);
        assert_eq!(loaded.layout_error, None);
        assert_eq!(loaded.layout.unwrap().component_order(), vec![second.component_id]);

        assert!(matches!(
            service.save(id, &stored).await,
            Err(DashboardError::Layout(LayoutError::LayoutConflict { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_reports_invalid_stored_layout() {
        let id = Uuid::new_v4();
        let mut wide = DashboardComponent::new_default(ComponentKind::Value);
        wide.left = 11;
        let mut stored = DashboardViewConfig::new(4);
        stored.components.push(wide);
        let (service, _) = service_with(
            Dashboard::new(id, None, Some(stored.clone())),
            OverlapPolicy::LastWriteWins,
        );

        let loaded = service.load(id).await.unwrap();
        assert_eq!(loaded.view_config, stored);
        assert_eq!(loaded.layout, None);
        assert!(loaded.layout_error.unwrap().contains("past the dashboard width"));
    }
}
