//! Period-indexed metric rows out of a highlights-style table.
//!
//! Row 0 names the periods. Body rows are either section headers (which move
//! the cursor) or labelled data rows, resolved against the dictionary of the
//! section currently in effect.

use tracing::trace;

use super::fields::{resolve_field, section_header, SectionKind};
use super::period::derive_period;
use super::text::{normalize, parse_number};
use super::ExtractionError;
use crate::models::{FinancialSection, MetricRow, MetricValue, PeriodKey};

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub periods: Vec<PeriodKey>,
    pub sections: Vec<FinancialSection>,
}

/// Extract a table whose rows start in `initial` until a header says otherwise.
pub fn extract_table(
    table: &[Vec<String>],
    initial: SectionKind,
) -> Result<ExtractedTable, ExtractionError> {
    let header = table.first().ok_or(ExtractionError::MissingHeaderRow { cells: 0 })?;
    if header.len() < 2 {
        return Err(ExtractionError::MissingHeaderRow { cells: header.len() });
    }

    let periods: Vec<PeriodKey> = header[1..].iter().map(|c| derive_period(c)).collect();

    let scan = table[1..]
        .iter()
        .fold(Scan::new(initial), |scan, row| scan.step(row, &periods));

    Ok(ExtractedTable { periods, sections: scan.into_sections() })
}

/// Fold state: the section cursor plus everything emitted so far.
struct Scan {
    current: SectionKind,
    entered: Vec<SectionKind>,
    rows: Vec<(SectionKind, MetricRow)>,
}

impl Scan {
    fn new(initial: SectionKind) -> Self {
        Self { current: initial, entered: vec![initial], rows: Vec::new() }
    }

    fn step(mut self, row: &[String], periods: &[PeriodKey]) -> Self {
        if let Some(section) = section_header(row) {
            self.current = section;
            if !self.entered.contains(&section) {
                self.entered.push(section);
            }
            return self;
        }

        let Some(label) = row.first().map(|c| normalize(c)) else { return self };
        if label.is_empty() {
            return self;
        }

        match resolve_field(&label, self.current.dictionary()) {
            Some(row_key) => {
                let values = metric_values(&row[1..], periods);
                self.rows.push((
                    self.current,
                    MetricRow { row_key: row_key.to_string(), label, values },
                ));
            }
            None => trace!("unmapped row {:?} in {}", label, self.current.key()),
        }
        self
    }

    fn into_sections(self) -> Vec<FinancialSection> {
        let Scan { entered, mut rows, .. } = self;
        entered
            .into_iter()
            .map(|kind| {
                let (mine, rest): (Vec<_>, Vec<_>) =
                    rows.drain(..).partition(|(k, _)| *k == kind);
                rows = rest;
                FinancialSection {
                    section_key: kind.key().to_string(),
                    section_label: kind.label().to_string(),
                    rows: mine.into_iter().map(|(_, r)| r).collect(),
                }
            })
            .collect()
    }
}

/// One value per period, in column order; missing cells count as no data.
fn metric_values(cells: &[String], periods: &[PeriodKey]) -> Vec<MetricValue> {
    periods
        .iter()
        .enumerate()
        .map(|(i, p)| MetricValue {
            period_key: p.key.clone(),
            value: cells.get(i).and_then(|c| parse_number(c)),
        })
        .collect()
}
