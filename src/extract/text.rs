//! Whitespace and number clean-up shared by every extractor.

/// Space-like code points the SET pages use for layout.
const NBSP: [char; 3] = ['\u{a0}', '\u{2007}', '\u{202f}'];

/// Default unit of the highlights tables when the page omits it.
pub const DEFAULT_UNIT: &str = "ล้านบาท";

/// Canonical form of scraped text: non-breaking spaces become plain spaces,
/// whitespace runs collapse to one space, ends are trimmed.
/// "  กำไร\u{a0}\u{a0}สุทธิ " → "กำไร สุทธิ"
pub fn normalize(raw: &str) -> String {
    let spaced: String = raw
        .chars()
        .map(|c| if NBSP.contains(&c) { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a locale-formatted number; "no data" markers and junk become `None`.
/// "1,234.50" → 1234.5 | "-" → None | "" → None | "N/A" → None
pub fn parse_number(text: &str) -> Option<f64> {
    let s = normalize(text);
    if s.is_empty() || s == "-" || s == "—" {
        return None;
    }
    let cleaned = s.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Strip the "หน่วย :" prefix from a unit caption.
/// "หน่วย : ล้านบาท" → "ล้านบาท" | "" → DEFAULT_UNIT
pub fn parse_unit(caption: &str) -> String {
    let s = normalize(caption);
    let s = s.strip_prefix("หน่วย").unwrap_or(&s);
    let s = s.trim().trim_start_matches(':').trim();
    if s.is_empty() { DEFAULT_UNIT.to_string() } else { s.to_string() }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_nbsp_and_runs() {
        assert_eq!(normalize("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(normalize("  สินทรัพย์รวม \n\t "), "สินทรัพย์รวม");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\u{202f}x\u{2007}y\u{a0}"), "x y");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["a\u{a0}\u{a0}b", " XD  15 ม.ค.\u{a0}2568 ", "", "\t\n"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234"), Some(1234.0));
        assert_eq!(parse_number(" 12,345.67 "), Some(12345.67));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("—"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_parse_number_zero_is_not_null() {
        assert_eq!(parse_number("0.00"), Some(0.0));
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("หน่วย : ล้านบาท"), "ล้านบาท");
        assert_eq!(parse_unit("หน่วย: พันบาท"), "พันบาท");
        assert_eq!(parse_unit("  "), DEFAULT_UNIT);
    }
}
