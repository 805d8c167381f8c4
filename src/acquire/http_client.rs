use crate::config::SourceConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{page_url, PageSource, Resource};

/// Fetches pages over HTTP, optionally through a prerender service.
///
/// One request per call: retrying and pacing belong to whoever runs this.
pub struct HttpPageSource {
    inner: reqwest::Client,
    base_url: String,
    render_endpoint: Option<Url>,
}

impl HttpPageSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // SET sets a consent cookie on first hit
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        let render_endpoint = config
            .render_endpoint
            .as_deref()
            .map(|e| Url::parse(e).with_context(|| format!("Invalid render endpoint {:?}", e)))
            .transpose()?;

        Ok(Self {
            inner,
            base_url: config.base_url.clone(),
            render_endpoint,
        })
    }

    /// URL actually requested: the page itself, or the renderer pointed at it.
    fn request_url(&self, page: &str) -> String {
        match &self.render_endpoint {
            Some(endpoint) => {
                let mut url = endpoint.clone();
                url.query_pairs_mut().append_pair("url", page);
                url.to_string()
            }
            None => page.to_string(),
        }
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let resp = self.inner.get(url).send().await
            .with_context(|| format!("Request failed for {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error {}", status)).with_context(|| format!("GET {}", url));
        }

        resp.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    fn page_url(&self, resource: Resource, symbol: &str) -> String {
        page_url(&self.base_url, resource, symbol)
    }

    async fn fetch_page(&self, resource: Resource, symbol: &str) -> Result<String> {
        let page = self.page_url(resource, symbol);
        self.get_text(&self.request_url(&page)).await
    }
}
