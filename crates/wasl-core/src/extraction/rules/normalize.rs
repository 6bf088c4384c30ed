//! Normalization of raw OCR text before extraction.

use super::patterns::{
    ARABIC_THEN_DIGIT, DIGIT_THEN_ARABIC, MOB_NO_LABEL, MULTI_WHITESPACE, NOISE_PUNCTUATION,
};

/// Split tokens glued together by OCR and collapse punctuation noise.
///
/// Steps, each applied to the result of the previous one:
/// 1. pad every `Mob.No` / `MobNo` label with spaces,
/// 2. separate digits from adjacent Arabic letters (`556464353مازن` -> `556464353 مازن`),
/// 3. turn runs of `_ - | , : / ( ) [ ]` into a single space,
/// 4. collapse whitespace runs of two or more into one space and trim.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = MOB_NO_LABEL.replace_all(text, " ${1} ");
    let text = DIGIT_THEN_ARABIC.replace_all(&text, "${1} ${2}");
    let text = ARABIC_THEN_DIGIT.replace_all(&text, "${1} ${2}");
    let text = NOISE_PUNCTUATION.replace_all(&text, " ");
    let text = MULTI_WHITESPACE.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_digit_glued_to_arabic() {
        assert!(normalize("556464353مازن").contains("556464353 مازن"));
        assert_eq!(normalize("مازن556"), "مازن 556");
    }

    #[test]
    fn test_mob_no_label_is_padded() {
        assert_eq!(normalize("556464353Mob.Noمازن"), "556464353 Mob.No مازن");
        assert_eq!(normalize("xMOBNOy"), "x MOBNO y");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(normalize("اسم العميل: سالم"), "اسم العميل سالم");
        assert_eq!(normalize("a_-|,b (c) [d] e/f"), "a b c d e f");
    }

    #[test]
    fn test_single_newline_kept() {
        assert_eq!(normalize("سالم\nالعتيبي"), "سالم\nالعتيبي");
        assert_eq!(normalize("سالم \n العتيبي"), "سالم العتيبي");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "556464353Mob.Noمازن",
            "  الجوال:0556123456شكراً  ",
            "اسم العميل : سالم-العتيبي (VIP)\n\nMob.No:0551112223",
            "x\tMob.No\ty",
            "Mob.NoMob.No",
            "م1م2 [ ] ||| 3ب",
            "فاتورة ضريبية\nرقم الفاتورة 12345\nالتاريخ 2024/01/15",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
