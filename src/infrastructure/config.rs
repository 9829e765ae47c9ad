use crate::domain::dashboard::DEFAULT_DASHBOARD_HEIGHT_IN_UNITS;
use crate::domain::layout::OverlapPolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub model_api: ModelApiSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_height")]
    pub default_height_in_units: u32,
    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            default_height_in_units: default_height(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_height() -> u32 {
    DEFAULT_DASHBOARD_HEIGHT_IN_UNITS
}

/// Loads `config/dashboard.*`, overridden by `DASHBOARD__SECTION__KEY` env vars
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_from("config/dashboard")
}

pub fn load_from(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
