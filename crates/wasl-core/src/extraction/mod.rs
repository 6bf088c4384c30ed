//! Customer field extraction from OCR text.

pub mod rules;

pub use rules::{
    canonical_phone, clean_name_candidate, find_name, find_phone, normalize, ExtractionMatch,
    FieldExtractor, NameExtractor, PhoneExtractor, Rule,
};

use serde::Serialize;
use tracing::debug;

/// Name and phone found on one page of OCR text.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerExtraction {
    /// The page text after normalization.
    pub normalized_text: String,
    /// Best phone candidate, if any.
    pub phone: Option<ExtractionMatch<String>>,
    /// Best name candidate, if any.
    pub name: Option<ExtractionMatch<String>>,
}

impl CustomerExtraction {
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_ref().map(|m| m.value.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(|m| m.value.as_str())
    }
}

/// Normalize raw OCR text once, then find the phone and, anchored on it, the name.
pub fn extract_customer(raw_text: &str) -> CustomerExtraction {
    let normalized_text = normalize(raw_text);

    let phone = PhoneExtractor::new()
        .with_normalization(false)
        .extract(&normalized_text);

    let name = NameExtractor::new()
        .with_phone(phone.as_ref().map(|m| m.value.as_str()))
        .extract(&normalized_text);

    debug!(
        phone = ?phone.as_ref().map(|m| m.rule),
        name = ?name.as_ref().map(|m| m.rule),
        "customer extraction"
    );

    CustomerExtraction {
        normalized_text,
        phone,
        name,
    }
}
