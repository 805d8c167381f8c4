//! Page acquisition: getting a rendered SET quote page as serialized DOM.
//!
//! Rendering itself (headless browser, waits, resource blocking) lives
//! outside this crate. A [`PageSource`] hands back the finished HTML and
//! [`dom`] turns it into the raw snapshots the extractors consume.

pub mod dom;
pub mod http_client;
pub mod snapshot_dir;

use crate::config::{SourceConfig, SourceMode};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::Arc;

use self::http_client::HttpPageSource;
use self::snapshot_dir::SnapshotDirSource;

// ── Resources ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    KeyFinancials,
    CompanyHighlights,
    MajorShareholders,
    RightsBenefits,
    CompanyProfile,
}

impl Resource {
    /// Path below `/quote/{SYMBOL}/` on set.or.th.
    pub fn path(self) -> &'static str {
        match self {
            Self::KeyFinancials | Self::CompanyHighlights => "financial-statement/company-highlights",
            Self::MajorShareholders => "major-shareholders",
            Self::RightsBenefits => "rights-benefits",
            Self::CompanyProfile => "company-profile/information",
        }
    }

    /// File stem used for DOM dumps.
    pub fn slug(self) -> &'static str {
        match self {
            Self::KeyFinancials | Self::CompanyHighlights => "company-highlights",
            Self::MajorShareholders => "major-shareholders",
            Self::RightsBenefits => "rights-benefits",
            Self::CompanyProfile => "company-profile",
        }
    }
}

/// `https://…/quote` + `BTS` + resource → `https://…/quote/BTS/major-shareholders`
pub fn page_url(base_url: &str, resource: Resource, symbol: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), symbol, resource.path())
}

/// Trim + uppercase, rejecting anything that can't be a SET ticker.
/// Tickers include digits and `-` / `.` / `&` (e.g. `AP`, `24CS`, `BTS-W5`, `M-CHAI`).
pub fn normalise_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        bail!("empty symbol");
    }
    if symbol.contains("..")
        || !symbol.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '&'))
    {
        bail!("invalid symbol {:?}", raw);
    }
    Ok(symbol)
}

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable page source.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Public URL of the page, reported as `sourceUrl`.
    fn page_url(&self, resource: Resource, symbol: &str) -> String;

    /// Rendered HTML of the page. Failures are opaque upstream errors.
    async fn fetch_page(&self, resource: Resource, symbol: &str) -> Result<String>;
}

pub fn source_from_config(config: &SourceConfig) -> Result<Arc<dyn PageSource>> {
    Ok(match config.mode {
        SourceMode::Http => Arc::new(HttpPageSource::new(config)?),
        SourceMode::Snapshot => Arc::new(SnapshotDirSource::new(config)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url("https://www.set.or.th/th/market/product/stock/quote/", Resource::CompanyProfile, "BTS"),
            "https://www.set.or.th/th/market/product/stock/quote/BTS/company-profile/information"
        );
        assert_eq!(
            page_url("http://x", Resource::KeyFinancials, "PTT"),
            "http://x/PTT/financial-statement/company-highlights"
        );
    }

    #[test]
    fn test_normalise_symbol() {
        assert_eq!(normalise_symbol(" bts ").unwrap(), "BTS");
        assert_eq!(normalise_symbol("bts-w5").unwrap(), "BTS-W5");
        assert!(normalise_symbol("").is_err());
        assert!(normalise_symbol("../etc").is_err());
        assert!(normalise_symbol("a/b").is_err());
    }
}
