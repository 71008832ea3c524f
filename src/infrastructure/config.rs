use crate::domain::theme::ThemeName;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const CONFIG_FILE: &str = "config/dashboard";

/// Widest container a client may report, in pixels.
pub const MAX_CONTAINER_WIDTH: f64 = 10_000.0;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub default_width: f64,
    pub resize_debounce_ms: u64,
    pub theme: ThemeName,
}

impl ChartSettings {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Width to draw at for a client-reported width. Missing, non-finite or
    /// oversized values give the default width.
    pub fn container_width(&self, requested: Option<f64>) -> f64 {
        requested.filter(|width| is_drawable_width(*width)).unwrap_or(self.default_width)
    }
}

/// Zero and negative widths pass: they draw nothing.
pub fn is_drawable_width(width: f64) -> bool {
    width.is_finite() && width <= MAX_CONTAINER_WIDTH
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_width: 640.0,
            resize_debounce_ms: 100,
            theme: ThemeName::Light,
        }
    }
}

/// Defaults, then `config/dashboard.*`, then `DASHBOARD__*` variables, then
/// `API_BASE_URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    dashboard_config(CONFIG_FILE, std::env::var("API_BASE_URL").ok())
}

fn dashboard_config(file: &str, api_base_url: Option<String>) -> anyhow::Result<DashboardConfig> {
    let charts = ChartSettings::default();
    let settings = config::Config::builder()
        .set_default("server.listen", "0.0.0.0:8080")?
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("charts.default_width", charts.default_width)?
        .set_default("charts.resize_debounce_ms", charts.resize_debounce_ms)?
        .set_default("charts.theme", charts.theme.as_str())?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("api.base_url", api_base_url)?
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = dashboard_config("config/missing", None).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.charts.default_width, 640.0);
        assert_eq!(config.charts.resize_debounce(), Duration::from_millis(100));
        assert_eq!(config.charts.theme, ThemeName::Light);
    }

    #[test]
    fn test_api_base_url_override_wins() {
        let config = dashboard_config("config/missing", Some("https://stats.example.org".to_string())).unwrap();
        assert_eq!(config.api.base_url, "https://stats.example.org");
    }

    #[test]
    fn test_container_width_falls_back_on_bad_input() {
        let charts = ChartSettings::default();

        assert_eq!(charts.container_width(Some(480.0)), 480.0);
        assert_eq!(charts.container_width(Some(0.0)), 0.0);
        assert_eq!(charts.container_width(None), 640.0);
        assert_eq!(charts.container_width(Some(f64::INFINITY)), 640.0);
        assert_eq!(charts.container_width(Some(f64::NAN)), 640.0);
        assert_eq!(charts.container_width(Some(1e9)), 640.0);
    }
}
