//! Common regex patterns for Arabic invoice extraction.
//!
//! Arabic letters are matched with the `ء-ي` range (U+0621..U+064A), which
//! covers the base alphabet but not diacritics or Persian/Urdu extensions.

use lazy_static::lazy_static;
use regex::Regex;

/// Label keywords that may sit next to the customer phone number, in priority order.
pub const CLIENT_KEYWORDS: &[&str] = &[
    r"اسم\s*العميل",
    r"الى\s*المكرم",
    r"إلى\s*المكرم",
    r"المكرم",
    r"Mob\.?No",
    r"الجوال",
    r"رقم\s*الجوال",
    r"جوال",
];

/// Label keywords that precede the customer name, in priority order.
pub const NAME_KEYWORDS: &[&str] = &[
    r"اسم\s*العميل",
    r"إلى\s*المكرم",
    r"الى\s*المكرم",
    r"المكرم",
];

/// Saudi mobile number: optional leading 0, then 5, then 8 digits.
pub const PHONE_FRAGMENT: &str = r"0?5\d{8}";

/// Maximum number of characters allowed between a label and a phone number.
pub const LABEL_PROXIMITY: usize = 60;

/// Characters kept on each side of a phone number when looking for a nearby name.
pub const NAME_WINDOW: usize = 60;

lazy_static! {
    // Normalization
    pub static ref MOB_NO_LABEL: Regex = Regex::new(r"(?i)(Mob\.?No)").unwrap();

    pub static ref DIGIT_THEN_ARABIC: Regex = Regex::new(r"(\d)([ء-ي])").unwrap();

    pub static ref ARABIC_THEN_DIGIT: Regex = Regex::new(r"([ء-ي])(\d)").unwrap();

    pub static ref NOISE_PUNCTUATION: Regex = Regex::new(r"[_\-|,:/()\[\]]+").unwrap();

    pub static ref MULTI_WHITESPACE: Regex = Regex::new(r"\s{2,}").unwrap();

    // Phone numbers
    pub static ref PHONE: Regex = Regex::new(PHONE_FRAGMENT).unwrap();

    // Arabic phrases: two or more whitespace-joined words
    pub static ref ARABIC_PHRASE: Regex = Regex::new(r"[ء-ي]+(?:\s+[ء-ي]+)+").unwrap();

    pub static ref ARABIC_WORD: Regex = Regex::new(r"[ء-ي]{2,}").unwrap();

    // Name cleaning
    pub static ref NAME_NOISE_LABELS: Regex = Regex::new(
        r"(?i)Mob\.?No|رقم\s*الجوال|الجوال|رقم|جوال"
    ).unwrap();

    pub static ref ANY_DIGIT: Regex = Regex::new(r"\d").unwrap();

    pub static ref NAME_PUNCTUATION: Regex = Regex::new(r"[_\-|,:.()]").unwrap();

    /// Per keyword: label followed by a phone, then phone followed by the label.
    pub static ref LABELED_PHONES: Vec<LabeledPattern> = CLIENT_KEYWORDS
        .iter()
        .map(|kw| LabeledPattern {
            keyword: *kw,
            // Lazy gap: a greedy one would eat the leading 0 of the number.
            label_first: Regex::new(&format!(
                r"(?i)(?:{kw}).{{0,{LABEL_PROXIMITY}}}?({PHONE_FRAGMENT})"
            ))
            .unwrap(),
            phone_first: Regex::new(&format!(
                r"(?i)({PHONE_FRAGMENT}).{{0,{LABEL_PROXIMITY}}}(?:{kw})"
            ))
            .unwrap(),
        })
        .collect();

    /// Per keyword: label, optional separator, then the run of text that holds the name.
    pub static ref LABELED_NAMES: Vec<(&'static str, Regex)> = NAME_KEYWORDS
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"(?i)(?:{kw})\s*[:\-]?\s*([ء-ي0-9\s\-]+)")).unwrap();
            (*kw, re)
        })
        .collect();
}

/// Compiled patterns for one client keyword.
pub struct LabeledPattern {
    /// Source keyword pattern.
    pub keyword: &'static str,
    /// Keyword, then a phone within [`LABEL_PROXIMITY`] characters.
    pub label_first: Regex,
    /// Phone, then the keyword within [`LABEL_PROXIMITY`] characters.
    pub phone_first: Regex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(LABELED_PHONES.len(), CLIENT_KEYWORDS.len());
        assert_eq!(LABELED_NAMES.len(), NAME_KEYWORDS.len());
        assert!(PHONE.is_match("0551234567"));
        assert!(ARABIC_PHRASE.is_match("سالم العتيبي"));
    }

    #[test]
    fn test_phone_pattern_shape() {
        assert_eq!(PHONE.find("x 551234567 y").unwrap().as_str(), "551234567");
        assert_eq!(PHONE.find("0551234567").unwrap().as_str(), "0551234567");
        assert!(PHONE.find("0451234567").is_none());
        assert!(PHONE.find("05512345").is_none());
    }
}
