//! Company highlights, pivoted per period with every row label kept.
//!
//! Unlike [`super::table`], nothing is filtered through a dictionary here:
//! each body row contributes one metric to each period column.

use std::sync::LazyLock;

use regex::Regex;

use super::fields::{section_header, SectionKind};
use super::period::derive_period;
use super::text::{normalize, parse_number};
use super::ExtractionError;
use crate::models::{
    CompanyHighlights, HighlightPeriod, HighlightsBlock, Metric, TradingStatPeriod,
    TradingStatsBlock,
};

/// "01/01/2567 - 31/12/2567" inside a period header cell.
static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})\s*-\s*([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})")
        .expect("valid date range regex")
});

/// Label of the trading-stats row holding the statement date per column.
const STATEMENT_DATE_LABEL: &str = "วันที่ของงบการเงิน";

pub fn extract_highlights(
    financial: &[Vec<String>],
    trading: Option<&[Vec<String>]>,
    unit: &str,
) -> Result<CompanyHighlights, ExtractionError> {
    Ok(CompanyHighlights {
        highlights: HighlightsBlock {
            unit: unit.to_string(),
            periods: highlight_periods(financial)?,
        },
        trading_stats: TradingStatsBlock {
            periods: trading.map(trading_periods).unwrap_or_default(),
        },
    })
}

fn highlight_periods(table: &[Vec<String>]) -> Result<Vec<HighlightPeriod>, ExtractionError> {
    let header = table.first().ok_or(ExtractionError::MissingHeaderRow { cells: 0 })?;
    if header.len() < 2 {
        return Err(ExtractionError::MissingHeaderRow { cells: header.len() });
    }

    let empty: Vec<HighlightPeriod> = header[1..]
        .iter()
        .map(|cell| {
            let period = derive_period(cell);
            let (from_date, to_date) = DATE_RANGE
                .captures(&normalize(cell))
                .map(|c| (c[1].to_string(), c[2].to_string()))
                .unwrap_or_default();
            HighlightPeriod {
                period_key: period.key,
                period_label: period.label,
                from_date,
                to_date,
                financial_accounts: Vec::new(),
                financial_ratios: Vec::new(),
            }
        })
        .collect();

    let (periods, _) = table[1..].iter().fold(
        (empty, SectionKind::KeyFinancials),
        |(mut periods, section), row| {
            if let Some(next) = section_header(row) {
                // the highlights table only ever moves from accounts to ratios
                let section = if next == SectionKind::FinancialRatios { next } else { section };
                return (periods, section);
            }
            let Some(label) = row.first().map(|c| normalize(c)).filter(|l| !l.is_empty()) else {
                return (periods, section);
            };
            for (i, period) in periods.iter_mut().enumerate() {
                let metric = Metric {
                    label: label.clone(),
                    value: row.get(i + 1).and_then(|c| parse_number(c)),
                };
                match section {
                    SectionKind::FinancialRatios => period.financial_ratios.push(metric),
                    _ => period.financial_accounts.push(metric),
                }
            }
            (periods, section)
        },
    );

    Ok(periods)
}

/// A trading table without a usable header contributes no periods.
fn trading_periods(table: &[Vec<String>]) -> Vec<TradingStatPeriod> {
    let Some(header) = table.first().filter(|h| h.len() >= 2) else {
        return Vec::new();
    };

    let mut periods: Vec<TradingStatPeriod> = header[1..]
        .iter()
        .map(|cell| TradingStatPeriod {
            period_key: derive_period(cell).key,
            period_label: normalize(cell),
            financial_statement_as_of: None,
            metrics: Vec::new(),
        })
        .collect();

    for row in &table[1..] {
        let Some(label) = row.first().map(|c| normalize(c)).filter(|l| !l.is_empty()) else {
            continue;
        };
        let is_statement_date = label.contains(STATEMENT_DATE_LABEL);
        for (i, period) in periods.iter_mut().enumerate() {
            let cell = row.get(i + 1).map(|c| c.as_str()).unwrap_or("");
            if is_statement_date {
                period.financial_statement_as_of = Some(normalize(cell));
            } else {
                period.metrics.push(Metric { label: label.clone(), value: parse_number(cell) });
            }
        }
    }

    periods
}
