//! Customer phone number extraction.

use super::normalize::normalize;
use super::patterns::{LabeledPattern, LABELED_PHONES, PHONE};
use super::{ExtractionMatch, FieldExtractor, Rule};

/// Phone number extractor preferring numbers next to client labels.
///
/// Rules, first match wins:
/// 1. for each client keyword in order: keyword then phone, else phone then keyword,
/// 2. the first phone-shaped number anywhere.
pub struct PhoneExtractor {
    normalize: bool,
}

impl PhoneExtractor {
    /// Create a new phone extractor that normalizes its input.
    pub fn new() -> Self {
        Self { normalize: true }
    }

    /// Set whether the input should be normalized first.
    ///
    /// Normalization is idempotent, so this only saves work for callers that
    /// already hold normalized text.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    fn prepare(&self, text: &str) -> String {
        if self.normalize {
            normalize(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let text = self.prepare(text);
        if text.is_empty() {
            return None;
        }

        LABELED_PHONES
            .iter()
            .find_map(|pattern| labeled_phone(&text, pattern))
            .or_else(|| bare_phone(&text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let text = self.prepare(text);
        let mut results: Vec<Self::Output> = Vec::new();

        for pattern in LABELED_PHONES.iter() {
            for found in [
                label_then_phone(&text, pattern),
                phone_then_label(&text, pattern),
            ]
            .into_iter()
            .flatten()
            {
                if !results.iter().any(|r| r.value == found.value) {
                    results.push(found);
                }
            }
        }

        for m in PHONE.find_iter(&text) {
            if results.iter().any(|r| r.value == m.as_str()) {
                continue;
            }
            results.push(
                ExtractionMatch::new(m.as_str().to_string(), Rule::BarePhone)
                    .with_position(m.start(), m.end()),
            );
        }

        results
    }
}

fn labeled_phone(text: &str, pattern: &LabeledPattern) -> Option<ExtractionMatch<String>> {
    label_then_phone(text, pattern).or_else(|| phone_then_label(text, pattern))
}

fn label_then_phone(text: &str, pattern: &LabeledPattern) -> Option<ExtractionMatch<String>> {
    let caps = pattern.label_first.captures(text)?;
    let phone = caps.get(1)?;
    Some(
        ExtractionMatch::new(phone.as_str().to_string(), Rule::LabelThenPhone)
            .with_keyword(pattern.keyword)
            .with_position(phone.start(), phone.end()),
    )
}

fn phone_then_label(text: &str, pattern: &LabeledPattern) -> Option<ExtractionMatch<String>> {
    let caps = pattern.phone_first.captures(text)?;
    let phone = caps.get(1)?;
    Some(
        ExtractionMatch::new(phone.as_str().to_string(), Rule::PhoneThenLabel)
            .with_keyword(pattern.keyword)
            .with_position(phone.start(), phone.end()),
    )
}

fn bare_phone(text: &str) -> Option<ExtractionMatch<String>> {
    PHONE.find(text).map(|m| {
        ExtractionMatch::new(m.as_str().to_string(), Rule::BarePhone)
            .with_position(m.start(), m.end())
    })
}

/// Find the most likely customer phone number in OCR text.
pub fn find_phone(text: &str) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

/// Fold a phone number to ASCII digits.
///
/// OCR with an Arabic language pack may emit Arabic-Indic digits
/// (`٠١٢` or `۰۱۲`); those are mapped to `012`. Non-digit characters are dropped.
pub fn canonical_phone(phone: &str) -> String {
    phone
        .chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
            '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
            _ => None,
        })
        .collect()
}
