//! Rule-based field extractors for Arabic invoices.
//!
//! Each field is resolved by an ordered list of rules. The first rule that
//! yields a candidate wins, so the order of the lists below is the priority
//! policy.

pub mod cleaner;
pub mod name;
pub mod normalize;
pub mod patterns;
pub mod phone;

pub use cleaner::clean_name_candidate;
pub use name::{find_name, NameExtractor};
pub use normalize::normalize;
pub use phone::{canonical_phone, find_phone, PhoneExtractor};

use serde::Serialize;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidates for the field, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// The rule that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Label keyword, then a phone number.
    LabelThenPhone,
    /// Phone number, then a label keyword.
    PhoneThenLabel,
    /// Any phone-shaped number.
    BarePhone,
    /// Text following a name label.
    NameLabel,
    /// Arabic phrase around the located phone number.
    NearPhone,
    /// First Arabic phrase in the page.
    FirstPhrase,
}

impl Rule {
    /// Rough confidence for candidates found by this rule.
    pub fn confidence(self) -> f32 {
        match self {
            Rule::LabelThenPhone | Rule::NameLabel => 0.95,
            Rule::PhoneThenLabel => 0.85,
            Rule::NearPhone => 0.7,
            Rule::BarePhone => 0.6,
            Rule::FirstPhrase => 0.3,
        }
    }
}

/// A candidate value with the rule that found it.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Rule that produced the value.
    pub rule: Rule,
    /// Label keyword involved, if any.
    pub keyword: Option<&'static str>,
    /// Byte span of the matched source text in the normalized text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: Rule) -> Self {
        Self {
            value,
            rule,
            keyword: None,
            position: None,
        }
    }

    pub fn with_keyword(mut self, keyword: &'static str) -> Self {
        self.keyword = Some(keyword);
        self
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub fn confidence(&self) -> f32 {
        self.rule.confidence()
    }
}
