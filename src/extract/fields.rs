//! Thai row labels → canonical field keys, and the sections they live in.
//!
//! Lookup is exact on the normalised label. A label missing from the
//! dictionary means "drop the row"; that is filtering, not an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::text::normalize;

pub type FieldDictionary = HashMap<&'static str, &'static str>;

/// Balance-sheet, income and ratio rows of the highlights table.
pub static FINANCIAL_FIELDS: LazyLock<FieldDictionary> = LazyLock::new(|| {
    HashMap::from([
        ("สินทรัพย์รวม", "totalAssets"),
        ("สินทรัทย์รวม", "totalAssets"),  // misspelt on some pages
        ("หนี้สินรวม", "totalLiabilities"),
        ("ส่วนของผู้ถือหุ้น", "equity"),
        ("มูลค่าหุ้นที่เรียกชำระแล้ว", "paidUpCapital"),
        ("รายได้รวม", "totalRevenue"),
        ("กำไร (ขาดทุน) จากกิจกรรมอื่น", "otherActivitiesProfit"),
        ("กำไรสุทธิ", "netProfit"),
        ("กำไรต่อหุ้น (บาท)", "eps"),
        ("ROA (%)", "roa"),
        ("ROE (%)", "roe"),
        ("อัตรากำไรสุทธิ (%)", "netProfitMargin"),
        ("D/E (เท่า)", "debtToEquity"),
    ])
});

/// Trading-statistics rows.
pub static TRADING_FIELDS: LazyLock<FieldDictionary> = LazyLock::new(|| {
    HashMap::from([
        ("ราคาล่าสุด (บาท)", "lastPrice"),
        ("มูลค่าหลักทรัพย์ตามราคาตลาด (ล้านบาท)", "marketCap"),
        ("P/E (เท่า)", "pe"),
        ("P/BV (เท่า)", "pbv"),
        ("มูลค่าหุ้นทางบัญชีต่อหุ้น (บาท)", "bvps"),
        ("อัตราส่วนเงินปันผลตอบแทน (%)", "dividendYield"),
    ])
});

pub fn resolve_field(label: &str, dictionary: &FieldDictionary) -> Option<&'static str> {
    dictionary.get(label).copied()
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SectionKind {
    #[default]
    KeyFinancials,
    FinancialRatios,
    MarketStatistics,
}

impl SectionKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::KeyFinancials => "key_financials",
            Self::FinancialRatios => "financial_ratios",
            Self::MarketStatistics => "market_statistics",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::KeyFinancials => "บัญชีทางการเงินที่สำคัญ",
            Self::FinancialRatios => "อัตราส่วนทางการเงินที่สำคัญ",
            Self::MarketStatistics => "ค่าสถิติสำคัญ ณ วันที่",
        }
    }

    pub fn dictionary(self) -> &'static FieldDictionary {
        match self {
            Self::KeyFinancials | Self::FinancialRatios => &FINANCIAL_FIELDS,
            Self::MarketStatistics => &TRADING_FIELDS,
        }
    }

    /// Which section a label names, if any.
    pub fn named_in(label: &str) -> Option<Self> {
        if label.contains("ค่าสถิติ") || label.contains("สถิติการซื้อขาย") {
            Some(Self::MarketStatistics)
        } else if label.contains("อัตราส่วนทางการเงิน") {
            Some(Self::FinancialRatios)
        } else if label.contains("บัญชีทางการเงิน") {
            Some(Self::KeyFinancials)
        } else {
            None
        }
    }
}

/// A row is a section header when its label names a section and it carries
/// no values. Header detection is checked before dictionary lookup.
pub fn section_header(row: &[String]) -> Option<SectionKind> {
    let (label, values) = row.split_first()?;
    if values.iter().any(|v| !normalize(v).is_empty()) {
        return None;
    }
    SectionKind::named_in(&normalize(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_exact_only() {
        assert_eq!(resolve_field("สินทรัพย์รวม", &FINANCIAL_FIELDS), Some("totalAssets"));
        assert_eq!(resolve_field("สินทรัพย์รวม (ล้านบาท)", &FINANCIAL_FIELDS), None);
        assert_eq!(resolve_field("P/E (เท่า)", &TRADING_FIELDS), Some("pe"));
        assert_eq!(resolve_field("P/E (เท่า)", &FINANCIAL_FIELDS), None);
    }

    #[test]
    fn test_dictionaries_disjoint() {
        for label in FINANCIAL_FIELDS.keys() {
            assert!(!TRADING_FIELDS.contains_key(label), "{label} in both dictionaries");
        }
    }

    #[test]
    fn test_section_header_detection() {
        assert_eq!(
            section_header(&row(&["บัญชีทางการเงินที่สำคัญ", "", ""])),
            Some(SectionKind::KeyFinancials)
        );
        assert_eq!(
            section_header(&row(&["อัตราส่วนทางการเงินที่สำคัญ"])),
            Some(SectionKind::FinancialRatios)
        );
        assert_eq!(
            section_header(&row(&["ค่าสถิติสำคัญ ณ วันที่", "\u{a0}"])),
            Some(SectionKind::MarketStatistics)
        );
        assert_eq!(section_header(&row(&["สินทรัพย์รวม", "", ""])), None);
        assert_eq!(section_header(&[]), None);
    }

    #[test]
    fn test_blank_dividend_yield_row_is_not_header() {
        let r = row(&["อัตราส่วนเงินปันผลตอบแทน (%)", "", ""]);
        assert_eq!(section_header(&r), None);
    }

    #[test]
    fn test_data_row_with_section_word_is_not_header() {
        let r = row(&["อัตราส่วนเงินปันผลตอบแทน (%)", "3.10", "2.95"]);
        assert_eq!(section_header(&r), None);
        assert_eq!(resolve_field(&r[0], &TRADING_FIELDS), Some("dividendYield"));
    }
}
