//! Per-resource orchestration: page source → DOM → extractors → envelope.
//!
//! ## Resources
//!
//! Each method fetches one SET quote page for one symbol and returns a fresh
//! response. Nothing is cached and nothing is shared between calls, so the
//! same service can serve many symbols concurrently.
//!
//! Upstream failures (network, missing dump) come back as opaque errors with
//! the symbol and resource in context; structural problems in the page come
//! back as an [`ExtractionError`](crate::extract::ExtractionError).

use crate::acquire::{dom, normalise_symbol, PageSource, Resource};
use crate::extract::{assemble, events, highlights, profile, shareholders, table};
use crate::extract::fields::SectionKind;
use crate::extract::ExtractionError;
use crate::models::{
    CompanyHighlightsResponse, CompanyProfileResponse, MajorShareholdersResponse, ProfileInfo,
    RightsBenefitsResponse, ThaiStockFinancialsResponse,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub struct QuoteService {
    source: Arc<dyn PageSource>,
}

impl QuoteService {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    async fn fetch(&self, resource: Resource, symbol: &str) -> Result<(String, String)> {
        let url = self.source.page_url(resource, symbol);
        info!("{}: fetching {:?} ({})", symbol, resource, url);
        let html = self.source.fetch_page(resource, symbol).await
            .with_context(|| format!("fetch {:?} for {}", resource, symbol))?;
        debug!("{}: {} bytes of DOM", symbol, html.len());
        Ok((url, html))
    }

    pub async fn key_financials(&self, symbol: &str) -> Result<ThaiStockFinancialsResponse> {
        let symbol = normalise_symbol(symbol)?;
        let (url, html) = self.fetch(Resource::KeyFinancials, &symbol).await?;

        let tables = dom::highlight_tables(&html);
        let financial = tables
            .financial
            .ok_or(ExtractionError::BlockNotFound("company highlights table"))?;

        let financial = table::extract_table(&financial, SectionKind::KeyFinancials)
            .with_context(|| format!("key financials for {}", symbol))?;
        let market = tables
            .trading
            .map(|t| table::extract_table(&t, SectionKind::MarketStatistics))
            .transpose()
            .with_context(|| format!("trading statistics for {}", symbol))?;

        let payload = assemble::key_financials(financial, market, &tables.unit);
        info!(
            "{}: {} periods, {} rows",
            symbol,
            payload.periods.len(),
            payload.sections.iter().map(|s| s.rows.len()).sum::<usize>()
        );
        Ok(assemble::assemble(&symbol, &url, payload))
    }

    pub async fn company_highlights(&self, symbol: &str) -> Result<CompanyHighlightsResponse> {
        let symbol = normalise_symbol(symbol)?;
        let (url, html) = self.fetch(Resource::CompanyHighlights, &symbol).await?;

        let tables = dom::highlight_tables(&html);
        let financial = tables
            .financial
            .ok_or(ExtractionError::BlockNotFound("company highlights table"))?;

        let payload = highlights::extract_highlights(&financial, tables.trading.as_deref(), &tables.unit)
            .with_context(|| format!("company highlights for {}", symbol))?;
        Ok(assemble::assemble(&symbol, &url, payload))
    }

    pub async fn major_shareholders(&self, symbol: &str) -> Result<MajorShareholdersResponse> {
        let symbol = normalise_symbol(symbol)?;
        let (url, html) = self.fetch(Resource::MajorShareholders, &symbol).await?;

        let rows = dom::shareholder_table(&html)
            .ok_or(ExtractionError::BlockNotFound("major shareholders table"))?;
        let items = shareholders::extract_shareholders(&rows)
            .with_context(|| format!("major shareholders for {}", symbol))?;

        info!("{}: {} shareholders", symbol, items.len());
        Ok(assemble::assemble(&symbol, &url, assemble::major_shareholders(items)))
    }

    pub async fn rights_benefits(&self, symbol: &str) -> Result<RightsBenefitsResponse> {
        let symbol = normalise_symbol(symbol)?;
        let (url, html) = self.fetch(Resource::RightsBenefits, &symbol).await?;

        let items = events::parse_cards(&dom::cards(&html));
        for ev in &items {
            let unmapped = events::unclassified_pairs(ev).count();
            if unmapped > 0 {
                debug!("{} {} {}: {} unmapped detail rows", symbol, ev.sign.code(), ev.event_date_text, unmapped);
            }
        }

        info!("{}: {} corporate actions", symbol, items.len());
        Ok(assemble::assemble(&symbol, &url, assemble::rights_benefits(items)))
    }

    pub async fn company_profile(&self, symbol: &str) -> Result<CompanyProfileResponse> {
        let symbol = normalise_symbol(symbol)?;
        let (url, html) = self.fetch(Resource::CompanyProfile, &symbol).await?;

        let block = dom::profile_block(&html, &url);
        let info = profile::extract_profile(block.as_ref())
            .with_context(|| format!("company profile for {}", symbol))?;
        Ok(assemble::assemble(&symbol, &url, ProfileInfo { info }))
    }
}
