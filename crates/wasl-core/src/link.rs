//! WhatsApp deep-link construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::extraction::canonical_phone;
use crate::models::config::MessagingConfig;

/// Characters left unescaped in the message: RFC 3986 unreserved plus `/`.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Builds `https://wa.me/<number>?text=<message>` links.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    review_link: String,
    country_code: String,
    template: String,
}

impl LinkBuilder {
    /// Create a builder with the default template and country code.
    pub fn new(review_link: impl Into<String>) -> Self {
        Self::from_config(&MessagingConfig {
            review_link: review_link.into(),
            ..MessagingConfig::default()
        })
    }

    pub fn from_config(config: &MessagingConfig) -> Self {
        Self {
            review_link: config.review_link.clone(),
            country_code: config.country_code.clone(),
            template: config.message_template.clone(),
        }
    }

    /// The greeting for a customer, before encoding.
    pub fn message(&self, name: &str) -> String {
        self.template
            .replace("{name}", name)
            .replace("{review_link}", &self.review_link)
    }

    /// Convert a local mobile number to international form.
    ///
    /// `5XXXXXXXX` is first padded to `05XXXXXXXX`; the leading digit is then
    /// replaced by the country code.
    pub fn international_number(&self, phone: &str) -> Option<String> {
        let mut digits = canonical_phone(phone);
        if digits.is_empty() {
            return None;
        }
        if digits.starts_with('5') {
            digits.insert(0, '0');
        }
        Some(format!("{}{}", self.country_code, &digits[1..]))
    }

    /// Build the link; empty when there is no phone number.
    pub fn build(&self, name: &str, phone: Option<&str>) -> String {
        let Some(number) = phone.and_then(|p| self.international_number(p)) else {
            return String::new();
        };

        let message = self.message(name);
        let encoded = utf8_percent_encode(&message, MESSAGE_ENCODE_SET);
        format!("https://wa.me/{number}?text={encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use pretty_assertions::assert_eq;

    const REVIEW: &str = "https://g.page/r/example";

    #[test]
    fn test_link_round_trip() {
        let builder = LinkBuilder::new(REVIEW);
        let link = builder.build("سالم", Some("0551234567"));

        let prefix = "https://wa.me/966551234567?text=";
        assert!(link.starts_with(prefix));

        let decoded = percent_decode_str(&link[prefix.len()..])
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, builder.message("سالم"));
        assert!(decoded.contains("سالم"));
        assert!(decoded.contains(REVIEW));
    }

    #[test]
    fn test_nine_digit_number_gets_padded() {
        let builder = LinkBuilder::new(REVIEW);
        assert!(builder
            .build("سالم", Some("551234567"))
            .starts_with("https://wa.me/966551234567?text="));
    }

    #[test]
    fn test_no_phone_no_link() {
        let builder = LinkBuilder::new(REVIEW);
        assert_eq!(builder.build("سالم", None), "");
        assert_eq!(builder.build("سالم", Some("")), "");
    }

    #[test]
    fn test_arabic_indic_digits() {
        let builder = LinkBuilder::new(REVIEW);
        assert_eq!(
            builder.international_number("٠٥٥١٢٣٤٥٦٧"),
            Some("966551234567".to_string())
        );
    }

    #[test]
    fn test_query_is_fully_escaped() {
        let builder = LinkBuilder::from_config(&MessagingConfig {
            review_link: "https://example.com/r?a=1&b=2".to_string(),
            country_code: "971".to_string(),
            message_template: "Hi {name}: {review_link}".to_string(),
        });
        let link = builder.build("A B", Some("0501234567"));
        assert_eq!(
            link,
            "https://wa.me/971501234567?text=Hi%20A%20B%3A%20https%3A//example.com/r%3Fa%3D1%26b%3D2"
        );
    }
}
