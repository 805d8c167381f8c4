//! Period header text → stable machine key.

use std::sync::LazyLock;

use regex::Regex;

use super::text::normalize;
use crate::models::PeriodKey;

/// "9 เดือน 2568", "งบ 6 เดือน/2567": month count, then a Buddhist-era year.
static MONTH_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)\s*เดือน.*?(25[0-9]{2})").expect("valid month-period regex")
});

/// Bare Buddhist-era year, e.g. "งบปี 2567".
static BE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"25[0-9]{2}").expect("valid BE year regex"));

/// Derive a period key from a table header cell.
///
/// Priority: month-count + year (`9M2568`), then year alone (`FY2567`),
/// then the normalised text itself as both key and label. Never fails; two
/// unrecognisable headers with the same text will share a key.
pub fn derive_period(raw_label: &str) -> PeriodKey {
    let clean = normalize(raw_label);

    if let Some(caps) = MONTH_PERIOD.captures(&clean) {
        let months = &caps[1];
        let year = &caps[2];
        return PeriodKey {
            key: format!("{months}M{year}"),
            label: format!("งบ {months} เดือน {year}"),
        };
    }

    if let Some(year) = BE_YEAR.find(&clean) {
        let year = year.as_str();
        return PeriodKey {
            key: format!("FY{year}"),
            label: format!("งบปี {year}"),
        };
    }

    PeriodKey { key: clean.clone(), label: clean }
}
