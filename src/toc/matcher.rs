//! Classification of normalized lines into ToC entries.
//!
//! Each supported numbering convention is an [`EntryFormat`] variant with
//! its own pattern. Variants are tried in a fixed priority order and the
//! first one that matches wins.

use super::normalize::normalize_line;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static APPENDIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:Appendix|APPENDIX)\s+([A-Z](?:\.[0-9]+)*)\s+(.+?)\s+(\d+)\s*$")
        .expect("appendix pattern is valid")
});

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)*)\s+(.+?)\s+(\d+)\s*$").expect("decimal pattern is valid")
});

static ALPHABETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Z](?:\.[0-9]+)*)\s+(.+?)\s+(\d+)\s*$")
        .expect("alphabetic pattern is valid")
});

static ROMAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([IVXLCDM]+)(?:\.([0-9]+))?\s+(.+?)\s+(\d+)\s*$")
        .expect("roman pattern is valid")
});

/// Numbering convention a ToC entry was recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryFormat {
    /// `Appendix A.1 Title 12`
    Appendix,
    /// `1.2 Title 4`
    Decimal,
    /// `A.1 Title 30`
    Alphabetic,
    /// `IV.2 Title 50`
    Roman,
}

impl EntryFormat {
    /// All formats in matching priority order.
    ///
    /// Appendix comes before Alphabetic so `Appendix A` is never read as
    /// a bare `A` section.
    pub const PRIORITY: [EntryFormat; 4] = [
        EntryFormat::Appendix,
        EntryFormat::Decimal,
        EntryFormat::Alphabetic,
        EntryFormat::Roman,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            EntryFormat::Appendix => &APPENDIX,
            EntryFormat::Decimal => &DECIMAL,
            EntryFormat::Alphabetic => &ALPHABETIC,
            EntryFormat::Roman => &ROMAN,
        }
    }

    /// Try to read `line` as an entry of this format.
    pub fn recognize(self, line: &str) -> Option<TocEntry> {
        let caps = self.pattern().captures(line)?;
        match self {
            EntryFormat::Roman => Self::extract_roman(&caps),
            _ => {
                let number = caps.get(1)?.as_str();
                let depth = number.matches('.').count() + 1;
                Some(TocEntry {
                    number: number.to_string(),
                    title: caps.get(2)?.as_str().trim().to_string(),
                    page: caps.get(3)?.as_str().parse().ok()?,
                    depth,
                    format: self,
                })
            }
        }
    }

    /// Roman entries sit at depth 1, or depth 2 with a `.n` sub-index.
    fn extract_roman(caps: &Captures<'_>) -> Option<TocEntry> {
        let numeral = caps.get(1)?.as_str();
        let (number, depth) = match caps.get(2) {
            Some(sub) => (format!("{}.{}", numeral, sub.as_str()), 2),
            None => (numeral.to_string(), 1),
        };
        Some(TocEntry {
            number,
            title: caps.get(3)?.as_str().trim().to_string(),
            page: caps.get(4)?.as_str().parse().ok()?,
            depth,
            format: EntryFormat::Roman,
        })
    }
}

/// One parsed ToC line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Numbering as it appeared (e.g. "1.2", "I", "A.1").
    pub number: String,
    /// Entry title.
    pub title: String,
    /// Printed page number.
    pub page: usize,
    /// Nesting level, 1 for top level.
    pub depth: usize,
    /// Convention the entry was recognized by.
    pub format: EntryFormat,
}

/// Classify an already normalized line.
///
/// `None` is the normal result for body text.
pub fn match_entry(line: &str) -> Option<TocEntry> {
    EntryFormat::PRIORITY
        .iter()
        .find_map(|format| format.recognize(line))
}

/// Whether a raw line reads as a ToC entry once normalized.
pub fn is_toc_line(line: &str) -> bool {
    match_entry(&normalize_line(line)).is_some()
}

/// Normalize and classify raw lines, returning entries in page order.
///
/// Lines that match no format are skipped. The sort is stable, so entries
/// printed on the same page keep their listing order.
pub fn parse_toc_lines<S: AsRef<str>>(lines: &[S]) -> Vec<TocEntry> {
    let mut entries: Vec<TocEntry> = lines
        .iter()
        .filter_map(|line| match_entry(&normalize_line(line.as_ref())))
        .collect();
    entries.sort_by_key(|e| e.page);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_entry() {
        let entry = match_entry("1.2 General rules 4").unwrap();
        assert_eq!(entry.number, "1.2");
        assert_eq!(entry.title, "General rules");
        assert_eq!(entry.page, 4);
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.format, EntryFormat::Decimal);
    }

    #[test]
    fn test_decimal_entry_any_leader_style() {
        let lines = [
            "1.2 General rules .................. 4",
            "1.2 General rules . . . . . 4",
            "1.2 General rules \u{2026}\u{2026}\u{2026} 4",
            "1.2 General rules \u{2022}\u{2022}\u{2022}\u{2022} 4",
            "1.2   General rules   \u{00B7}\u{00B7}\u{00B7}   4",
        ];
        for line in lines {
            let entry = match_entry(&normalize_line(line)).unwrap();
            assert_eq!(entry.number, "1.2", "line: {line}");
            assert_eq!(entry.title, "General rules", "line: {line}");
            assert_eq!(entry.depth, 2, "line: {line}");
            assert_eq!(entry.page, 4, "line: {line}");
        }
    }

    #[test]
    fn test_appendix_wins_over_alphabetic() {
        let entry = match_entry("Appendix A Wiring diagrams 120").unwrap();
        assert_eq!(entry.format, EntryFormat::Appendix);
        assert_eq!(entry.number, "A");
        assert_eq!(entry.title, "Wiring diagrams");
        assert_eq!(entry.page, 120);
        assert_eq!(entry.depth, 1);

        let entry = match_entry("APPENDIX B.2 Torque values 131").unwrap();
        assert_eq!(entry.format, EntryFormat::Appendix);
        assert_eq!(entry.number, "B.2");
        assert_eq!(entry.depth, 2);
    }

    #[test]
    fn test_alphabetic_entry() {
        let entry = match_entry("C.1.4 Spare parts 88").unwrap();
        assert_eq!(entry.format, EntryFormat::Alphabetic);
        assert_eq!(entry.number, "C.1.4");
        assert_eq!(entry.depth, 3);
    }

    #[test]
    fn test_roman_entries() {
        let entry = match_entry("IV Maintenance 50").unwrap();
        assert_eq!(entry.format, EntryFormat::Roman);
        assert_eq!(entry.number, "IV");
        assert_eq!(entry.depth, 1);

        let entry = match_entry("XII.3 Disposal 77").unwrap();
        assert_eq!(entry.format, EntryFormat::Roman);
        assert_eq!(entry.number, "XII.3");
        assert_eq!(entry.title, "Disposal");
        assert_eq!(entry.depth, 2);
    }

    #[test]
    fn test_single_letter_roman_reads_as_alphabetic() {
        let entry = match_entry("I Introduction 3").unwrap();
        assert_eq!(entry.format, EntryFormat::Alphabetic);
        assert_eq!(entry.number, "I");
        assert_eq!(entry.depth, 1);
    }

    #[test]
    fn test_body_text_does_not_match() {
        assert!(match_entry("The pump must be primed before use.").is_none());
        assert!(match_entry("Table of Contents").is_none());
        assert!(match_entry("1.2 General rules").is_none());
        assert!(match_entry("").is_none());
        assert!(match_entry("1 Title 99999999999999999999999999").is_none());
    }

    #[test]
    fn test_is_toc_line_normalizes() {
        assert!(is_toc_line("  2 Installation ........ 9  "));
        assert!(!is_toc_line("Installation"));
    }

    #[test]
    fn test_parse_toc_lines_sorts_stably() {
        let lines = [
            "2 Installation ... 9",
            "1 Safety ... 4",
            "1.1 General rules ... 4",
            "not an entry",
        ];
        let entries = parse_toc_lines(&lines);
        let numbers: Vec<&str> = entries.iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "1.1", "2"]);
    }
}
