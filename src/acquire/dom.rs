//! Serialized DOM → raw snapshots.
//!
//! Selectors are scoped to the specific SET widgets; a whole-document table
//! scan picks up the wrong table too easily.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::extract::text::{normalize, parse_unit};
use crate::models::{LabelValue, RawCard, RawCardSnapshot, RawLabeledBlock, RawLabeledPair, RawTableSnapshot};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

// ── Selectors ─────────────────────────────────────────────────────────────────

static HIGHLIGHT_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".table-custom-field-main.table-turnover .table-custom-field--cnc"));
static TRADING_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".table-custom-field-main.table-tradingstat .table-custom-field--cnc"));
static SHAREHOLDER_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".table-custom-field-main .table-custom-field--cnc"));
static UNIT: LazyLock<Selector> = LazyLock::new(|| selector(".tab-content .unit span"));

static TR: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static BODY_TR: LazyLock<Selector> = LazyLock::new(|| selector("tbody tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("th, td"));
static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));

static ACCORDION_ITEM: LazyLock<Selector> = LazyLock::new(|| selector(".accordion-item"));
static ACCORDION_BUTTON: LazyLock<Selector> = LazyLock::new(|| selector("button.accordion-button"));
static ACCORDION_BODY: LazyLock<Selector> = LazyLock::new(|| selector(".accordion-body"));
static DETAIL_ROW: LazyLock<Selector> = LazyLock::new(|| selector(".d-flex.mb-2"));

static PROFILE_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector(".company-info-detail"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("h4 + span"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| selector("label"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static VALUE: LazyLock<Selector> = LazyLock::new(|| selector("span, a"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Text nodes are joined with a space: period headers put the year and the
/// date range in sibling elements with nothing between them.
fn text_of(el: ElementRef) -> String {
    normalize(&el.text().collect::<Vec<_>>().join(" "))
}

fn matrix(table: ElementRef, rows: &Selector, cells: &Selector) -> RawTableSnapshot {
    table
        .select(rows)
        .map(|tr| tr.select(cells).map(text_of).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect()
}

// ── Highlights page ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightTables {
    pub financial: Option<RawTableSnapshot>,
    pub trading: Option<RawTableSnapshot>,
    pub unit: String,
}

pub fn highlight_tables(html: &str) -> HighlightTables {
    let doc = Html::parse_document(html);

    let financial = doc.select(&HIGHLIGHT_TABLE).next().map(|t| matrix(t, &TR, &CELL));
    let trading = doc.select(&TRADING_TABLE).next().map(|t| matrix(t, &TR, &CELL));
    let unit = parse_unit(&doc.select(&UNIT).next().map(text_of).unwrap_or_default());

    HighlightTables { financial, trading, unit }
}

// ── Major shareholders ────────────────────────────────────────────────────────

/// Body rows of the shareholder table; `None` if the table isn't on the page.
pub fn shareholder_table(html: &str) -> Option<RawTableSnapshot> {
    let doc = Html::parse_document(html);
    let table = doc.select(&SHAREHOLDER_TABLE).next()?;
    Some(matrix(table, &BODY_TR, &TD))
}

// ── Rights & benefits ─────────────────────────────────────────────────────────

/// Accordion cards in page order. Items missing a header button or body are
/// not cards and are skipped, as are detail rows without both label and value.
pub fn cards(html: &str) -> RawCardSnapshot {
    let doc = Html::parse_document(html);

    doc.select(&ACCORDION_ITEM)
        .filter_map(|item| {
            let button = item.select(&ACCORDION_BUTTON).next()?;
            let body = item.select(&ACCORDION_BODY).next()?;

            let detail_pairs = body
                .select(&DETAIL_ROW)
                .filter_map(|row| {
                    let label = row.select(&LABEL).next().map(text_of)?;
                    let value = row.select(&SPAN).next().map(text_of)?;
                    if label.is_empty() || value.is_empty() {
                        return None;
                    }
                    Some(LabelValue::new(label, value))
                })
                .collect();

            Some(RawCard { header_text: text_of(button), detail_pairs })
        })
        .collect()
}

// ── Company profile ───────────────────────────────────────────────────────────

/// The company-information block, or `None` if the page lacks it.
/// Link targets are resolved against `page_url`.
pub fn profile_block(html: &str, page_url: &str) -> Option<RawLabeledBlock> {
    let doc = Html::parse_document(html);
    let root = doc.select(&PROFILE_BLOCK).next()?;
    let base = Url::parse(page_url).ok();

    let anchor_text = root.select(&DESCRIPTION).next().map(text_of).unwrap_or_default();

    let pairs = root
        .select(&LABEL)
        .filter_map(|label| {
            let container = label.parent().and_then(ElementRef::wrap)?;
            let value = container.select(&VALUE).next()?;
            let href = container
                .select(&LINK)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|h| resolve_href(base.as_ref(), h));
            Some(RawLabeledPair { label: text_of(label), value: text_of(value), href })
        })
        .collect();

    Some(RawLabeledBlock { anchor_text, pairs })
}

fn resolve_href(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}
