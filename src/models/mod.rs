use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Raw snapshots (acquisition side) ──────────────────────────────────────────

/// Cell text of one scraped table: row 0 is the header, the rest are body rows.
pub type RawTableSnapshot = Vec<Vec<String>>;

/// Accordion cards in page order.
pub type RawCardSnapshot = Vec<RawCard>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabelValue {
    pub label: String,
    pub value: String,
}

impl LabelValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// One corporate-action accordion: the coloured header strip plus its detail rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub header_text: String,
    pub detail_pairs: Vec<LabelValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawLabeledPair {
    pub label: String,
    pub value: String,
    pub href: Option<String>,
}

/// The company-information block: description text under the heading,
/// followed by `<label>` / value entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawLabeledBlock {
    pub anchor_text: String,
    pub pairs: Vec<RawLabeledPair>,
}

// ── Financial tables ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    pub key: String,    // "FY2567", "9M2568"
    pub label: String,  // "งบปี 2567"
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue {
    pub period_key: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub row_key: String,
    pub label: String,
    pub values: Vec<MetricValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSection {
    pub section_key: String,
    pub section_label: String,
    pub rows: Vec<MetricRow>,
}

// ── Company highlights (label-preserving view) ────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HighlightPeriod {
    pub period_key: String,
    pub period_label: String,
    pub from_date: String,
    pub to_date: String,
    pub financial_accounts: Vec<Metric>,
    pub financial_ratios: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradingStatPeriod {
    pub period_key: String,
    pub period_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_statement_as_of: Option<String>,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighlightsBlock {
    pub unit: String,
    pub periods: Vec<HighlightPeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TradingStatsBlock {
    pub periods: Vec<TradingStatPeriod>,
}

// ── Shareholders ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareholderRecord {
    pub rank: u32,  // as printed on the page, never recomputed
    pub name: String,
    pub shares: Option<f64>,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShareholdersMeta {
    pub total_holders: usize,
    pub unit: String,
    pub percent_unit: String,
}

// ── Corporate actions ─────────────────────────────────────────────────────────

/// SET corporate-action sign shown on each rights & benefits card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BenefitSign {
    #[serde(rename = "XD")]
    ExDividend,
    #[serde(rename = "XR")]
    ExRights,
    #[serde(rename = "XW")]
    ExWarrant,
    #[serde(rename = "XB")]
    ExBigLot,
    #[serde(rename = "XM")]
    ExMeeting,
}

impl BenefitSign {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "XD" => Some(Self::ExDividend),
            "XR" => Some(Self::ExRights),
            "XW" => Some(Self::ExWarrant),
            "XB" => Some(Self::ExBigLot),
            "XM" => Some(Self::ExMeeting),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::ExDividend => "XD",
            Self::ExRights => "XR",
            Self::ExWarrant => "XW",
            Self::ExBigLot => "XB",
            Self::ExMeeting => "XM",
        }
    }
}

/// Typed keys of a card's recognised detail rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DetailField {
    BookCloseDateText,
    RecordDateText,
    PaymentDateText,
    BenefitTypeText,
    DividendPerShareText,
    PeriodText,
    DividendFromText,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Currency {
    #[default]
    #[serde(rename = "THB")]
    Thb,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorporateActionEvent {
    pub event_date_text: String,
    pub sign: BenefitSign,
    pub benefit_type_text: String,
    pub amount_text: String,
    pub amount_value: Option<f64>,
    pub currency: Currency,
    pub details: BTreeMap<DetailField, String>,
    pub raw_pairs: Vec<LabelValue>,
}

// ── Company profile ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub business_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

// ── Response envelopes ────────────────────────────────────────────────────────

/// Common wrapper: which symbol, where it came from and when.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sourced<T> {
    pub symbol: String,
    pub source_url: String,
    pub as_of: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyFinancials {
    pub unit: String,
    pub periods: Vec<PeriodKey>,
    pub sections: Vec<FinancialSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHighlights {
    pub highlights: HighlightsBlock,
    pub trading_stats: TradingStatsBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RightsBenefits {
    pub items: Vec<CorporateActionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MajorShareholders {
    pub meta: ShareholdersMeta,
    pub items: Vec<ShareholderRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileInfo {
    pub info: CompanyProfile,
}

pub type ThaiStockFinancialsResponse = Sourced<KeyFinancials>;
pub type CompanyHighlightsResponse = Sourced<CompanyHighlights>;
pub type RightsBenefitsResponse = Sourced<RightsBenefits>;
pub type MajorShareholdersResponse = Sourced<MajorShareholders>;
pub type CompanyProfileResponse = Sourced<ProfileInfo>;
