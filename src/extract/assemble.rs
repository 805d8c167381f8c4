//! Wrap extracted payloads into response envelopes.

use chrono::{DateTime, Utc};

use super::table::ExtractedTable;
use crate::models::{
    CorporateActionEvent, KeyFinancials, MajorShareholders, PeriodKey, RightsBenefits,
    ShareholderRecord, ShareholdersMeta, Sourced,
};

/// Stamp a payload with its symbol, source and the current time.
pub fn assemble<T>(symbol: &str, source_url: &str, payload: T) -> Sourced<T> {
    assemble_at(symbol, source_url, Utc::now(), payload)
}

pub fn assemble_at<T>(symbol: &str, source_url: &str, as_of: DateTime<Utc>, payload: T) -> Sourced<T> {
    Sourced {
        symbol: symbol.trim().to_uppercase(),
        source_url: source_url.to_string(),
        as_of,
        payload,
    }
}

/// Merge the financial table and (optionally) the trading table.
/// Periods are the union of both tables' periods in first-seen order.
pub fn key_financials(financial: ExtractedTable, market: Option<ExtractedTable>, unit: &str) -> KeyFinancials {
    let mut periods: Vec<PeriodKey> = financial.periods;
    let mut sections = financial.sections;

    if let Some(market) = market {
        for p in market.periods {
            if !periods.iter().any(|q| q.key == p.key) {
                periods.push(p);
            }
        }
        sections.extend(market.sections);
    }

    KeyFinancials { unit: unit.to_string(), periods, sections }
}

pub fn major_shareholders(items: Vec<ShareholderRecord>) -> MajorShareholders {
    MajorShareholders {
        meta: ShareholdersMeta {
            total_holders: items.len(),
            unit: "shares".to_string(),
            percent_unit: "%".to_string(),
        },
        items,
    }
}

pub fn rights_benefits(items: Vec<CorporateActionEvent>) -> RightsBenefits {
    RightsBenefits { items }
}
