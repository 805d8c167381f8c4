//! Ranked major-shareholder table: `rank | name | shares | percent`.

use tracing::trace;

use super::text::{normalize, parse_number};
use super::ExtractionError;
use crate::models::ShareholderRecord;

pub fn extract_shareholders(table: &[Vec<String>]) -> Result<Vec<ShareholderRecord>, ExtractionError> {
    let records = table
        .iter()
        .filter_map(|row| record_from_row(row))
        .try_fold(Vec::new(), |mut acc: Vec<ShareholderRecord>, record| {
            if let Some(prev) = acc.last() {
                if record.rank <= prev.rank {
                    return Err(ExtractionError::RankOutOfOrder {
                        previous: prev.rank,
                        found: record.rank,
                    });
                }
            }
            acc.push(record);
            Ok(acc)
        })?;

    if records.is_empty() {
        return Err(ExtractionError::EmptyTable("major shareholders"));
    }
    Ok(records)
}

/// Rows whose first cell isn't an integer rank (headers, totals) are skipped.
fn record_from_row(row: &[String]) -> Option<ShareholderRecord> {
    let rank_text = normalize(row.first()?);
    let Ok(rank) = rank_text.parse::<u32>() else {
        trace!("skipping shareholder row {:?}", rank_text);
        return None;
    };

    Some(ShareholderRecord {
        rank,
        name: row.get(1).map(|c| normalize(c)).unwrap_or_default(),
        shares: row.get(2).and_then(|c| parse_number(c)),
        percent: row.get(3).and_then(|c| parse_number(c)),
    })
}
