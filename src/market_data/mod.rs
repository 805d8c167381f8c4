//! Yahoo chart passthrough. The body is forwarded untouched.

use crate::config::ChartConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartOutcome {
    pub success: bool,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct ChartClient {
    inner: reqwest::Client,
    base_url: String,
}

impl ChartClient {
    pub fn new(config: &ChartConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { inner, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// `{base}/{name}.{country}` plus whichever of interval/range are non-blank.
    pub fn chart_url(&self, symbol: &str, interval: Option<&str>, range: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, symbol))
            .with_context(|| format!("Invalid chart URL for {}", symbol))?;
        for (key, value) in [("interval", interval), ("range", range)] {
            if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
                url.query_pairs_mut().append_pair(key, v);
            }
        }
        Ok(url)
    }

    /// Upstream failures are reported in the outcome, not as `Err`.
    pub async fn fetch(
        &self,
        name: &str,
        country: &str,
        interval: Option<&str>,
        range: Option<&str>,
    ) -> ChartOutcome {
        let symbol = format!("{}.{}", name, country);
        match self.get_json(&symbol, interval, range).await {
            Ok(data) => ChartOutcome { success: true, symbol, data: Some(data), error: None },
            Err(e) => {
                warn!("chart {}: {:#}", symbol, e);
                ChartOutcome { success: false, symbol, data: None, error: Some(format!("{:#}", e)) }
            }
        }
    }

    async fn get_json(
        &self,
        symbol: &str,
        interval: Option<&str>,
        range: Option<&str>,
    ) -> Result<serde_json::Value> {
        let url = self.chart_url(symbol, interval, range)?;
        debug!("Fetching url: {}", url);
        let resp = self.inner.get(url).send().await?.error_for_status()?;
        Ok(resp.json::<serde_json::Value>().await?)
    }
}
