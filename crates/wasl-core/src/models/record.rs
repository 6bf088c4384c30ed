//! Per-page records and the aggregated output dataset.

use std::collections::HashSet;

use serde::Serialize;

use crate::extraction::canonical_phone;

/// Name rendered when no customer name was found.
pub const UNKNOWN_NAME: &str = "unknown";

/// Dataset column headers, in output order.
pub const COLUMNS: [&str; 5] = [
    "اسم العميل",
    "رقم الجوال",
    "رابط واتساب",
    "ملف الفاتورة",
    "صفحة",
];

/// Result for one OCR'd page, or a placeholder for a document with no pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// Invoice file name (without directories).
    pub file_name: String,
    /// 1-based page number; `None` for a placeholder record.
    pub page: Option<u32>,
    /// Customer name, if one was found.
    pub name: Option<String>,
    /// Customer phone number, if one was found and not excluded.
    pub phone: Option<String>,
    /// Messaging deep-link; empty without a phone.
    pub link: String,
}

impl PageRecord {
    /// Placeholder for a document that yielded no pages.
    pub fn placeholder(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            page: None,
            name: None,
            phone: None,
            link: String::new(),
        }
    }

    /// Customer name, or [`UNKNOWN_NAME`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_NAME)
    }

    /// Phone number, or an empty string.
    pub fn display_phone(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }

    /// Page number, or an empty string.
    pub fn display_page(&self) -> String {
        self.page.map(|p| p.to_string()).unwrap_or_default()
    }

    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// The business's own phone numbers, compared in canonical ASCII-digit form.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    numbers: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            numbers: numbers
                .into_iter()
                .map(|n| canonical_phone(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Check whether a phone number belongs to the business.
    pub fn contains(&self, phone: &str) -> bool {
        self.numbers.contains(&canonical_phone(phone))
    }
}

/// Counts describing how a dataset was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Records received, placeholders included.
    pub total_records: usize,
    /// Records kept with a phone number.
    pub with_phone: usize,
    /// Records kept without a phone number.
    pub without_phone: usize,
    /// Records dropped because their phone was already seen.
    pub duplicates_dropped: usize,
}

/// Final ordered dataset.
///
/// Records with a phone come first, one per distinct phone (first occurrence
/// wins), followed by every record without a phone. Both groups keep
/// encounter order. Duplicates are dropped, not moved to the second group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputDataset {
    pub records: Vec<PageRecord>,
    pub stats: DatasetStats,
}

impl OutputDataset {
    pub fn from_records(records: impl IntoIterator<Item = PageRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut with_phone = Vec::new();
        let mut without_phone = Vec::new();
        let mut stats = DatasetStats::default();

        for record in records {
            stats.total_records += 1;
            match record.phone.as_deref().filter(|p| !p.is_empty()) {
                Some(phone) => {
                    if seen.insert(canonical_phone(phone)) {
                        with_phone.push(record);
                    } else {
                        stats.duplicates_dropped += 1;
                    }
                }
                None => without_phone.push(record),
            }
        }

        stats.with_phone = with_phone.len();
        stats.without_phone = without_phone.len();
        with_phone.extend(without_phone);

        Self {
            records: with_phone,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(file: &str, page: u32, phone: Option<&str>) -> PageRecord {
        PageRecord {
            file_name: file.to_string(),
            page: Some(page),
            name: Some("سالم".to_string()),
            phone: phone.map(str::to_string),
            link: String::new(),
        }
    }

    #[test]
    fn test_placeholder() {
        let r = PageRecord::placeholder("a.pdf");
        assert_eq!(r.display_name(), UNKNOWN_NAME);
        assert_eq!(r.display_phone(), "");
        assert_eq!(r.display_page(), "");
        assert_eq!(r.link, "");
        assert!(!r.has_phone());
    }

    #[test]
    fn test_exclusion_set() {
        let set = ExclusionSet::new(["0566522351", "0556565135"]);
        assert!(set.contains("0566522351"));
        assert!(set.contains("٠٥٦٦٥٢٢٣٥١"));
        assert!(!set.contains("0551234567"));
        assert!(!ExclusionSet::default().contains("0566522351"));
        assert!(!ExclusionSet::new(["", "n/a"]).contains(""));
    }

    #[test]
    fn test_partition_and_dedup() {
        let records = vec![
            record("a.pdf", 1, None),
            record("a.pdf", 2, Some("0551111111")),
            record("b.pdf", 1, Some("0552222222")),
            record("c.pdf", 1, Some("0551111111")),
            PageRecord::placeholder("d.pdf"),
            record("e.pdf", 1, Some("")),
        ];

        let dataset = OutputDataset::from_records(records);
        let order: Vec<(&str, Option<u32>)> = dataset
            .records
            .iter()
            .map(|r| (r.file_name.as_str(), r.page))
            .collect();

        assert_eq!(
            order,
            vec![
                ("a.pdf", Some(2)),
                ("b.pdf", Some(1)),
                ("a.pdf", Some(1)),
                ("d.pdf", None),
                ("e.pdf", Some(1)),
            ]
        );
        assert_eq!(
            dataset.stats,
            DatasetStats {
                total_records: 6,
                with_phone: 2,
                without_phone: 3,
                duplicates_dropped: 1,
            }
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = OutputDataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }
}
