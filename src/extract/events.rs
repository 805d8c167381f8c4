//! Rights & benefits accordion cards → corporate-action events.
//!
//! The header strip carries sign, date and amount, e.g.
//! `XD 15 ม.ค. 2568 0.50 บาท`; these are pulled out by pattern, not parsed.
//! Cards without a sign are not corporate actions and are dropped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::text::normalize;
use crate::models::{BenefitSign, CorporateActionEvent, Currency, DetailField, LabelValue, RawCard};

/// Sign code bounded by non-ASCII-word characters, so `XDวันที่` still
/// yields `XD` while `XDX` does not.
static SIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_])(XD|XR|XW|XB|XM)(?:$|[^A-Za-z0-9_])").expect("valid sign regex")
});

/// Day, Thai month token, Buddhist-era year: "15 ม.ค. 2568", "3 มีนาคม 2567".
static EVENT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}\s*[ก-ฮ]\S*\s*25[0-9]{2})").expect("valid event date regex")
});

/// Decimal amount followed by the baht currency word. Thousands separators
/// are not part of the pattern: `1,000.00 บาท` captures `000.00`.
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*บาท").expect("valid amount regex")
});

/// Parse every card in page order, dropping those without a sign.
pub fn parse_cards(cards: &[RawCard]) -> Vec<CorporateActionEvent> {
    let events: Vec<CorporateActionEvent> = cards.iter().filter_map(parse_card).collect();
    debug!("{} of {} cards are corporate actions", events.len(), cards.len());
    events
}

pub fn parse_card(card: &RawCard) -> Option<CorporateActionEvent> {
    let header = normalize(&card.header_text);

    let sign = SIGN
        .captures(&header)
        .and_then(|c| BenefitSign::from_code(&c[1]))?;

    let event_date_text = EVENT_DATE
        .captures(&header)
        .map(|c| c[1].to_string())
        .unwrap_or_default();

    let amount = AMOUNT.captures(&header).map(|c| c[1].to_string());
    let amount_value = amount.as_deref().and_then(|a| a.parse::<f64>().ok());
    let amount_text = amount.map(|a| format!("{a} บาท")).unwrap_or_default();

    let mut details = BTreeMap::new();
    let mut raw_pairs = Vec::with_capacity(card.detail_pairs.len());
    for pair in &card.detail_pairs {
        raw_pairs.push(pair.clone());
        if let Some(field) = classify_detail(&pair.label) {
            details.insert(field, normalize(&pair.value));
        }
    }

    let benefit_type_text = details
        .get(&DetailField::BenefitTypeText)
        .cloned()
        .unwrap_or_default();

    Some(CorporateActionEvent {
        event_date_text,
        sign,
        benefit_type_text,
        amount_text,
        amount_value,
        currency: Currency::Thb,
        details,
        raw_pairs,
    })
}

/// Match a detail label against the known rows. Whitespace inside the label
/// is ignored since the page wraps long labels unpredictably.
pub fn classify_detail(label: &str) -> Option<DetailField> {
    let k: String = label.chars().filter(|c| !c.is_whitespace()).collect();
    if k.is_empty() {
        return None;
    }

    if k == "วันปิดสมุดทะเบียน" {
        Some(DetailField::BookCloseDateText)
    } else if k == "วันกำหนดรายชื่อผู้ถือหุ้น" {
        Some(DetailField::RecordDateText)
    } else if k.starts_with("วันจ่าย") {
        Some(DetailField::PaymentDateText)
    } else if k == "ประเภท" {
        Some(DetailField::BenefitTypeText)
    } else if k.contains("บาท/หุ้น") {
        Some(DetailField::DividendPerShareText)
    } else if k.contains("รอบผล") {
        Some(DetailField::PeriodText)
    } else if k.contains("เงินปันผลจาก") {
        Some(DetailField::DividendFromText)
    } else {
        None
    }
}

/// Lets callers inspect which pairs went unclassified.
pub fn unclassified_pairs(event: &CorporateActionEvent) -> impl Iterator<Item = &LabelValue> {
    event.raw_pairs.iter().filter(|p| classify_detail(&p.label).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(header: &str, pairs: &[(&str, &str)]) -> RawCard {
        RawCard {
            header_text: header.to_string(),
            detail_pairs: pairs.iter().map(|(l, v)| LabelValue::new(*l, *v)).collect(),
        }
    }

    #[test]
    fn test_dividend_header() {
        let ev = parse_card(&card("XD 15 ม.ค. 2568 0.50 บาท", &[])).unwrap();
        assert_eq!(ev.sign, BenefitSign::ExDividend);
        assert_eq!(ev.event_date_text, "15 ม.ค. 2568");
        assert!(ev.event_date_text.contains("2568"));
        assert_eq!(ev.amount_value, Some(0.5));
        assert_eq!(ev.amount_text, "0.50 บาท");
        assert_eq!(ev.currency, Currency::Thb);
    }

    #[test]
    fn test_each_sign_code() {
        for (code, sign) in [
            ("XD", BenefitSign::ExDividend),
            ("XR", BenefitSign::ExRights),
            ("XW", BenefitSign::ExWarrant),
            ("XB", BenefitSign::ExBigLot),
            ("XM", BenefitSign::ExMeeting),
        ] {
            let ev = parse_card(&card(&format!("{code} 1 ก.พ. 2567"), &[])).unwrap();
            assert_eq!(ev.sign, sign);
            assert_eq!(ev.sign.code(), code);
        }
    }

    #[test]
    fn test_sign_must_be_whole_token() {
        assert!(parse_card(&card("XDX 15 ม.ค. 2568", &[])).is_none());
        assert!(parse_card(&card("ประชุมผู้ถือหุ้น 15 ม.ค. 2568", &[])).is_none());
    }

    #[test]
    fn test_sign_next_to_thai_text() {
        let ev = parse_card(&card("XDวันที่ 15 ม.ค. 2568 0.50 บาท", &[])).unwrap();
        assert_eq!(ev.sign, BenefitSign::ExDividend);
        assert_eq!(ev.amount_value, Some(0.5));

        let ev = parse_card(&card("ประกาศXR 3 ก.พ. 2568", &[])).unwrap();
        assert_eq!(ev.sign, BenefitSign::ExRights);
    }

    #[test]
    fn test_amount_stops_at_thousands_separator() {
        let ev = parse_card(&card("XD 1,000.00 บาท", &[])).unwrap();
        assert_eq!(ev.amount_text, "000.00 บาท");
        assert_eq!(ev.amount_value, Some(0.0));
    }

    #[test]
    fn test_cards_without_sign_are_excluded() {
        let cards = vec![
            card("XD 15 ม.ค. 2568 0.50 บาท", &[]),
            card("ข่าวทั่วไป", &[("ประเภท", "ไม่ระบุ")]),
            card("XM 30 เม.ย. 2568", &[]),
        ];
        let events = parse_cards(&cards);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].sign, BenefitSign::ExDividend);
        assert_eq!(events[1].sign, BenefitSign::ExMeeting);
    }

    #[test]
    fn test_missing_date_and_amount_degrade() {
        let ev = parse_card(&card("XM", &[])).unwrap();
        assert_eq!(ev.event_date_text, "");
        assert_eq!(ev.amount_value, None);
        assert_eq!(ev.amount_text, "");
    }

    #[test]
    fn test_details_and_raw_pairs() {
        let pairs = [
            ("วันปิดสมุดทะเบียน", "-"),
            ("วันกำหนดรายชื่อ ผู้ถือหุ้น", "16 ม.ค. 2568"),
            ("วันจ่ายปันผล", "5 ก.พ. 2568"),
            ("ประเภท", "เงินปันผล"),
            ("เงินปันผล (บาท/หุ้น)", "0.50"),
            ("รอบผลประกอบการ", "01/07/2567 - 30/09/2567"),
            ("เงินปันผลจาก", "กำไรสุทธิ"),
            ("หมายเหตุ", "-"),
        ];
        let ev = parse_card(&card("XD 15 ม.ค. 2568 0.50 บาท", &pairs)).unwrap();

        assert_eq!(ev.raw_pairs.len(), pairs.len());
        for (raw, (l, v)) in ev.raw_pairs.iter().zip(pairs.iter()) {
            assert_eq!((raw.label.as_str(), raw.value.as_str()), (*l, *v));
        }

        assert_eq!(ev.details.len(), 7);
        assert_eq!(ev.details[&DetailField::RecordDateText], "16 ม.ค. 2568");
        assert_eq!(ev.details[&DetailField::PaymentDateText], "5 ก.พ. 2568");
        assert_eq!(ev.details[&DetailField::DividendPerShareText], "0.50");
        assert_eq!(ev.benefit_type_text, "เงินปันผล");

        let unclassified: Vec<_> = unclassified_pairs(&ev).map(|p| p.label.as_str()).collect();
        assert_eq!(unclassified, vec!["หมายเหตุ"]);
    }

    #[test]
    fn test_details_serialise_with_camel_case_keys() {
        let ev = parse_card(&card("XD 1 ม.ค. 2568", &[("ประเภท", "เงินปันผล")])).unwrap();
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["sign"], "XD");
        assert_eq!(json["currency"], "THB");
        assert_eq!(json["details"]["benefitTypeText"], "เงินปันผล");
        assert_eq!(json["rawPairs"][0]["label"], "ประเภท");
    }
}
