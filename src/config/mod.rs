use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Where rendered SET pages come from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// GET each page (directly or through `render_endpoint`)
    #[default]
    Http,
    /// Read DOM dumps from `snapshot_dir`
    Snapshot,
}

/// Page acquisition configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub mode: SourceMode,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Prerender service; the page URL is passed as `?url=`.
    #[serde(default)]
    pub render_endpoint: Option<String>,

    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Upstream chart passthrough configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_base_url")]
    pub base_url: String,

    #[serde(default = "default_chart_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_chart_user_agent")]
    pub user_agent: String,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "https://www.set.or.th/th/market/product/stock/quote".to_string()
}
fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}
fn default_chart_base_url() -> String {
    "https://query2.finance.yahoo.com/v8/finance/chart".to_string()
}
fn default_chart_timeout_secs() -> u64 {
    5
}
fn default_chart_user_agent() -> String {
    "StockPulse/1.0".to_string()
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("SETQ").separator("__"))
            .build()?;

        Ok(Self::from_layers(cfg))
    }

    /// Deserialize merged layers, falling back to defaults on a bad value.
    fn from_layers(cfg: config::Config) -> Self {
        cfg.try_deserialize().unwrap_or_else(|e| {
            warn!("Invalid configuration, using defaults: {}", e);
            AppConfig::default()
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::default(),
            base_url: default_base_url(),
            render_endpoint: None,
            snapshot_dir: default_snapshot_dir(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_url: default_chart_base_url(),
            timeout_secs: default_chart_timeout_secs(),
            user_agent: default_chart_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[source]\nmode = \"snapshot\"\nsnapshot_dir = \"dumps\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.source.mode, SourceMode::Snapshot);
        assert_eq!(cfg.source.snapshot_dir, PathBuf::from("dumps"));
        assert_eq!(cfg.source.base_url, default_base_url());
        assert_eq!(cfg.source.render_endpoint, None);
        assert_eq!(cfg.chart.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_value_falls_back_to_defaults() {
        let layers = config::Config::builder()
            .add_source(config::File::from_str(
                "[source]\ntimeout_secs = \"soon\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let cfg = AppConfig::from_layers(layers);
        assert_eq!(cfg.source.timeout_secs, 60);
        assert_eq!(cfg.source.mode, SourceMode::Http);
    }
}
