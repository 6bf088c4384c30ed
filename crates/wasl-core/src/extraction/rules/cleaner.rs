//! Cleanup of raw name candidates.

use regex::Match;

use super::patterns::{
    ANY_DIGIT, ARABIC_PHRASE, ARABIC_WORD, MULTI_WHITESPACE, NAME_NOISE_LABELS, NAME_PUNCTUATION,
};

/// Strip labels, digits and punctuation from a name candidate and keep the
/// longest run of Arabic words.
///
/// Falls back to a single Arabic word of two or more letters. Returns `None`
/// when nothing Arabic survives.
pub fn clean_name_candidate(candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    let s = NAME_NOISE_LABELS.replace_all(candidate, " ");
    let s = ANY_DIGIT.replace_all(&s, " ");
    let s = NAME_PUNCTUATION.replace_all(&s, " ");
    let s = MULTI_WHITESPACE.replace_all(&s, " ");
    let s = s.trim();

    if let Some(phrase) = longest_arabic_phrase(s) {
        return Some(phrase.as_str().trim().to_string());
    }

    ARABIC_WORD.find(s).map(|m| m.as_str().to_string())
}

/// Longest run of two or more whitespace-joined Arabic words; the earliest wins ties.
pub(crate) fn longest_arabic_phrase(text: &str) -> Option<Match<'_>> {
    ARABIC_PHRASE
        .find_iter(text)
        .fold(None, |best: Option<Match<'_>>, m| match best {
            Some(b) if b.as_str().chars().count() >= m.as_str().chars().count() => Some(b),
            _ => Some(m),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        assert_eq!(clean_name_candidate(""), None);
        assert_eq!(clean_name_candidate("   "), None);
    }

    #[test]
    fn test_strips_label_and_digits() {
        assert_eq!(
            clean_name_candidate("Mob.No 0551234567 مازن الحربي"),
            Some("مازن الحربي".to_string())
        );
        assert_eq!(
            clean_name_candidate("رقم الجوال 0551234567 سالم العتيبي"),
            Some("سالم العتيبي".to_string())
        );
    }

    #[test]
    fn test_definite_phone_label_removed_whole() {
        assert_eq!(
            clean_name_candidate("سالم العتيبي\nالجوال 0551234567"),
            Some("سالم العتيبي".to_string())
        );
    }

    #[test]
    fn test_single_word_fallback() {
        assert_eq!(clean_name_candidate("سالم 123"), Some("سالم".to_string()));
        assert_eq!(clean_name_candidate("a ب c"), None);
    }

    #[test]
    fn test_no_arabic() {
        assert_eq!(clean_name_candidate("Invoice 2024 (copy)"), None);
        assert_eq!(clean_name_candidate("Mob.No 0551234567"), None);
    }

    #[test]
    fn test_longest_run_wins() {
        assert_eq!(
            clean_name_candidate("شكرا لكم Total عبدالله بن محمد القحطاني"),
            Some("عبدالله بن محمد القحطاني".to_string())
        );
        assert_eq!(
            clean_name_candidate("سالم علي x خالد فهد"),
            Some("سالم علي".to_string())
        );
    }
}
