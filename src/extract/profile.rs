use super::text::normalize;
use super::ExtractionError;
use crate::models::{CompanyProfile, RawLabeledBlock};

pub const ADDRESS_LABEL: &str = "ที่อยู่";
pub const PHONE_LABEL: &str = "เบอร์โทรศัพท์";
pub const FAX_LABEL: &str = "เบอร์โทรสาร";
pub const WEBSITE_LABEL: &str = "เว็บไซต์";

/// Build the profile from the company-information block.
///
/// `None` means the page had no such block at all, which is fatal. A block
/// without description text yields an empty description; a missing label
/// leaves its field unset.
pub fn extract_profile(block: Option<&RawLabeledBlock>) -> Result<CompanyProfile, ExtractionError> {
    let block = block.ok_or(ExtractionError::BlockNotFound("profile"))?;

    Ok(CompanyProfile {
        business_description: normalize(&block.anchor_text),
        address: by_label(block, ADDRESS_LABEL),
        phone: by_label(block, PHONE_LABEL),
        fax: by_label(block, FAX_LABEL),
        website: link_by_label(block, WEBSITE_LABEL),
    })
}

/// Text of the first entry whose label matches exactly. Blank values count
/// as absent.
pub fn by_label(block: &RawLabeledBlock, label: &str) -> Option<String> {
    let pair = block.pairs.iter().find(|p| normalize(&p.label) == label)?;
    non_blank(normalize(&pair.value))
}

/// Like [`by_label`], but a link target wins over its text.
pub fn link_by_label(block: &RawLabeledBlock, label: &str) -> Option<String> {
    let pair = block.pairs.iter().find(|p| normalize(&p.label) == label)?;
    let href = pair.href.as_deref().map(normalize).filter(|h| !h.is_empty());
    non_blank(href.unwrap_or_else(|| normalize(&pair.value)))
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawLabeledPair;

    fn pair(label: &str, value: &str, href: Option<&str>) -> RawLabeledPair {
        RawLabeledPair {
            label: label.to_string(),
            value: value.to_string(),
            href: href.map(str::to_string),
        }
    }

    fn block() -> RawLabeledBlock {
        RawLabeledBlock {
            anchor_text: " ให้บริการขนส่งมวลชน\u{a0}ระบบราง ".to_string(),
            pairs: vec![
                pair("ที่อยู่", "1000 ถนนพหลโยธิน  กรุงเทพฯ", None),
                pair("เบอร์โทรสาร", "0-2617-7133", None),
                pair("เว็บไซต์", "www.btsgroup.co.th", Some("http://www.btsgroup.co.th/")),
                pair("ที่อยู่", "ที่อยู่ซ้ำ", None),
            ],
        }
    }

    #[test]
    fn test_missing_block_is_error() {
        assert_eq!(extract_profile(None), Err(ExtractionError::BlockNotFound("profile")));
    }

    #[test]
    fn test_fields_by_label() {
        let p = extract_profile(Some(&block())).unwrap();
        assert_eq!(p.business_description, "ให้บริการขนส่งมวลชน ระบบราง");
        assert_eq!(p.address.as_deref(), Some("1000 ถนนพหลโยธิน กรุงเทพฯ"));
        assert_eq!(p.fax.as_deref(), Some("0-2617-7133"));
        assert_eq!(p.phone, None);
    }

    #[test]
    fn test_href_preferred_over_text() {
        assert_eq!(link_by_label(&block(), WEBSITE_LABEL).as_deref(), Some("http://www.btsgroup.co.th/"));
        assert_eq!(by_label(&block(), WEBSITE_LABEL).as_deref(), Some("www.btsgroup.co.th"));
    }

    #[test]
    fn test_phone_and_fax_keep_link_text() {
        let b = RawLabeledBlock {
            anchor_text: "x".into(),
            pairs: vec![
                pair("เบอร์โทรศัพท์", "0-2273-8611", Some("tel:022738611")),
                pair("เบอร์โทรสาร", "0-2273-8610", Some("tel:022738610")),
            ],
        };
        let p = extract_profile(Some(&b)).unwrap();
        assert_eq!(p.phone.as_deref(), Some("0-2273-8611"));
        assert_eq!(p.fax.as_deref(), Some("0-2273-8610"));
    }

    #[test]
    fn test_blank_anchor_is_empty_description() {
        let b = RawLabeledBlock { anchor_text: String::new(), pairs: vec![] };
        let p = extract_profile(Some(&b)).unwrap();
        assert_eq!(p.business_description, "");
        assert_eq!(p.website, None);
    }

    #[test]
    fn test_absent_fields_not_serialised() {
        let b = RawLabeledBlock { anchor_text: "x".into(), pairs: vec![pair("เบอร์โทรศัพท์", " ", None)] };
        let json = serde_json::to_value(extract_profile(Some(&b)).unwrap()).unwrap();
        assert_eq!(json["businessDescription"], "x");
        assert!(json.get("phone").is_none());
    }
}
