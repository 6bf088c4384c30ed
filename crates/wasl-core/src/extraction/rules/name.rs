//! Customer name extraction.

use tracing::trace;

use super::cleaner::{clean_name_candidate, longest_arabic_phrase};
use super::normalize::normalize;
use super::patterns::{ARABIC_PHRASE, LABELED_NAMES, NAME_WINDOW};
use super::{ExtractionMatch, FieldExtractor, Rule};

/// A name rule: normalized text and optional phone in, cleaned candidate out.
type NameRule = fn(&str, Option<&str>) -> Option<ExtractionMatch<String>>;

/// Name rules in priority order.
const NAME_RULES: &[(Rule, NameRule)] = &[
    (Rule::NameLabel, after_name_label),
    (Rule::NearPhone, near_phone),
    (Rule::FirstPhrase, first_phrase),
];

/// Name extractor using labels, then the phone position, then the first Arabic phrase.
pub struct NameExtractor {
    phone: Option<String>,
}

impl NameExtractor {
    /// Create a new name extractor with no phone context.
    pub fn new() -> Self {
        Self { phone: None }
    }

    /// Use an already located phone number as an anchor for the name.
    pub fn with_phone(mut self, phone: Option<&str>) -> Self {
        self.phone = phone.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let text = normalize(text);
        if text.is_empty() {
            return None;
        }

        for (rule, apply) in NAME_RULES {
            if let Some(found) = apply(&text, self.phone.as_deref()) {
                trace!(?rule, name = %found.value, "name rule matched");
                return Some(found);
            }
        }

        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let text = normalize(text);
        if text.is_empty() {
            return Vec::new();
        }

        NAME_RULES
            .iter()
            .filter_map(|(_, apply)| apply(&text, self.phone.as_deref()))
            .collect()
    }
}

/// Text following "اسم العميل" / "إلى المكرم" / "المكرم".
fn after_name_label(text: &str, _phone: Option<&str>) -> Option<ExtractionMatch<String>> {
    LABELED_NAMES.iter().find_map(|(keyword, re)| {
        let caps = re.captures(text)?;
        let run = caps.get(1)?;
        let name = clean_name_candidate(run.as_str())?;
        Some(
            ExtractionMatch::new(name, Rule::NameLabel)
                .with_keyword(*keyword)
                .with_position(run.start(), run.end()),
        )
    })
}

/// Longest Arabic phrase within [`NAME_WINDOW`] characters of the phone number.
fn near_phone(text: &str, phone: Option<&str>) -> Option<ExtractionMatch<String>> {
    let phone = phone?;
    let loc = text.find(phone)?;

    let start = back_chars(text, loc, NAME_WINDOW);
    let end = forward_chars(text, loc + phone.len(), NAME_WINDOW);
    let window = &text[start..end];

    let phrase = longest_arabic_phrase(window)?;
    let name = clean_name_candidate(phrase.as_str())?;
    Some(
        ExtractionMatch::new(name, Rule::NearPhone)
            .with_position(start + phrase.start(), start + phrase.end()),
    )
}

/// First Arabic phrase anywhere in the text.
fn first_phrase(text: &str, _phone: Option<&str>) -> Option<ExtractionMatch<String>> {
    let phrase = ARABIC_PHRASE.find(text)?;
    let name = clean_name_candidate(phrase.as_str())?;
    Some(ExtractionMatch::new(name, Rule::FirstPhrase).with_position(phrase.start(), phrase.end()))
}

/// Byte index `n` characters before `idx`, clamped to the start.
fn back_chars(text: &str, idx: usize, n: usize) -> usize {
    if n == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte index `n` characters after `idx`, clamped to the end.
fn forward_chars(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| idx + i)
        .unwrap_or(text.len())
}

/// Find the most likely customer name in OCR text.
///
/// `phone` is the number returned by [`find_phone`](super::find_phone) for the
/// same text, if any.
pub fn find_name(text: &str, phone: Option<&str>) -> Option<String> {
    NameExtractor::new()
        .with_phone(phone)
        .extract(text)
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text() {
        assert_eq!(find_name("", None), None);
        assert_eq!(find_name("", Some("0551234567")), None);
    }

    #[test]
    fn test_honorific_label() {
        assert_eq!(
            find_name("إلى المكرم سالم العتيبي", None),
            Some("سالم العتيبي".to_string())
        );
    }

    #[test]
    fn test_client_name_label() {
        let text = "فاتورة ضريبية\n\nاسم العميل: مازن الحربي\n\nMob.No: 0551234567";
        let found = NameExtractor::new().extract(text).unwrap();
        assert_eq!(found.value, "مازن الحربي");
        assert_eq!(found.rule, Rule::NameLabel);
    }

    #[test]
    fn test_label_with_glued_phone() {
        assert_eq!(
            find_name("اسم العميل:خالد الشمري0551234567", Some("0551234567")),
            Some("خالد الشمري".to_string())
        );
    }

    #[test]
    fn test_near_phone_fallback() {
        let text = "Invoice 7781 Total 250 SAR Customer فهد الدوسري 0559998887 Thanks";
        let found = NameExtractor::new()
            .with_phone(Some("0559998887"))
            .extract(text)
            .unwrap();
        assert_eq!(found.value, "فهد الدوسري");
        assert_eq!(found.rule, Rule::NearPhone);
    }

    #[test]
    fn test_near_phone_window_is_bounded() {
        let far = "x".repeat(80);
        let text = format!("نورة القحطاني {far} 0551234567 {far} سارة");
        let found = NameExtractor::new()
            .with_phone(Some("0551234567"))
            .extract(&text)
            .unwrap();
        assert_eq!(found.rule, Rule::FirstPhrase);
        assert_eq!(found.value, "نورة القحطاني");
    }

    #[test]
    fn test_first_phrase_fallback() {
        let found = NameExtractor::new()
            .extract("Total 120 عبدالرحمن السبيعي شكرا")
            .unwrap();
        assert_eq!(found.rule, Rule::FirstPhrase);
        assert_eq!(found.value, "عبدالرحمن السبيعي شكرا");
    }

    #[test]
    fn test_extract_all_follows_rule_order() {
        let all = NameExtractor::new()
            .with_phone(Some("0551234567"))
            .extract_all("إلى المكرم سالم العتيبي 0551234567");

        let rules: Vec<Rule> = all.iter().map(|m| m.rule).collect();
        assert_eq!(rules, vec![Rule::NameLabel, Rule::NearPhone, Rule::FirstPhrase]);
        assert_eq!(all[0].value, "سالم العتيبي");
        assert!(NameExtractor::new().extract_all("").is_empty());
    }

    #[test]
    fn test_no_name() {
        assert_eq!(find_name("Invoice 123 Total 456", None), None);
    }

    #[test]
    fn test_window_helpers_respect_char_boundaries() {
        let text = "سالم 0551234567";
        let loc = text.find("0551").unwrap();
        assert_eq!(back_chars(text, loc, 3), text.find("لم").unwrap());
        assert_eq!(back_chars(text, loc, 100), 0);
        assert_eq!(forward_chars(text, loc, 100), text.len());
        assert_eq!(forward_chars(text, loc, 2), loc + 2);
    }
}
