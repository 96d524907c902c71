//! Finding the ToC in the leading pages of a document.

use super::matcher::is_toc_line;
use crate::document::Page;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Leading pages searched for a ToC heading or entry-like lines.
pub const HEADING_SCAN_PAGES: usize = 6;

// "Contents" alone only counts when it is the whole page.
static TOC_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btable of contents\b|^\s*contents\s*$").expect("heading pattern is valid")
});

static TRAILING_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\s*$").expect("trailing page pattern is valid"));

/// Raw ToC lines and the pages they were taken from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedToc {
    /// Candidate lines, trimmed but not normalized, in page order.
    pub lines: Vec<String>,
    /// Page numbers that contributed at least one line, ascending.
    pub pages: Vec<usize>,
}

impl LocatedToc {
    /// True when no candidate lines were found.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn from_pages(pages: &[Page], collected: BTreeMap<usize, Vec<String>>) -> Self {
        let mut located = LocatedToc::default();
        for (index, lines) in collected {
            located.pages.push(pages[index].number);
            located.lines.extend(lines);
        }
        located
    }
}

/// Locate ToC lines in the first pages of a document.
///
/// Pages mentioning "Table of Contents", or consisting of nothing but
/// "Contents", are searched first, keeping lines that end in a page number. Without a heading, any
/// line that reads as a ToC entry is taken. Once content is found, the scan
/// continues into following pages (up to `max(2, scan_budget / 2)` of them)
/// and stops at the first page that adds nothing.
///
/// An empty result tells the caller to fall back to another segmentation.
pub fn locate_toc(pages: &[Page], scan_budget: usize) -> LocatedToc {
    let window = pages.len().min(HEADING_SCAN_PAGES);
    let mut collected = BTreeMap::new();

    for (index, page) in pages[..window].iter().enumerate() {
        if TOC_HEADING.is_match(&page.content) {
            let lines: Vec<String> = page
                .lines()
                .map(str::trim)
                .filter(|line| TRAILING_PAGE.is_match(line))
                .map(str::to_string)
                .collect();
            if !lines.is_empty() {
                collected.insert(index, lines);
            }
        }
    }

    if collected.is_empty() {
        collected = collect_entry_lines(&pages[..window]);
    }

    if collected.is_empty() {
        // No ToC near the front; look further in but do not extend.
        let budget_window = pages.len().min(scan_budget);
        if budget_window > window {
            return LocatedToc::from_pages(pages, collect_entry_lines(&pages[..budget_window]));
        }
        return LocatedToc::default();
    }

    extend_across_pages(pages, &mut collected, scan_budget);
    LocatedToc::from_pages(pages, collected)
}

/// Entry-like lines per page index.
fn collect_entry_lines(pages: &[Page]) -> BTreeMap<usize, Vec<String>> {
    pages
        .iter()
        .enumerate()
        .filter_map(|(index, page)| {
            let lines = entry_lines(page);
            (!lines.is_empty()).then_some((index, lines))
        })
        .collect()
}

fn entry_lines(page: &Page) -> Vec<String> {
    page.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_toc_line(line))
        .map(str::to_string)
        .collect()
}

fn extend_across_pages(
    pages: &[Page],
    collected: &mut BTreeMap<usize, Vec<String>>,
    scan_budget: usize,
) {
    let Some(&start) = collected.keys().next() else {
        return;
    };
    let extend = (scan_budget / 2).max(2);
    let last = (start + extend).min(pages.len().saturating_sub(1));

    for index in start + 1..=last {
        if collected.contains_key(&index) {
            continue;
        }
        let lines = entry_lines(&pages[index]);
        if lines.is_empty() {
            debug!(page = pages[index].number, "toc extension stopped");
            break;
        }
        collected.insert(index, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn doc(pages: &[&str]) -> Document {
        Document::from_page_texts("test", pages.iter().copied())
    }

    #[test]
    fn test_heading_page() {
        let d = doc(&[
            "Pump Manual\nRevision 3",
            "Table of Contents\n1 Safety ..... 4\n1.1 General rules ..... 4\nSee also",
            "1 Safety\nAlways wear gloves.",
        ]);
        let toc = locate_toc(&d.pages, 16);
        assert_eq!(toc.lines, vec!["1 Safety ..... 4", "1.1 General rules ..... 4"]);
        assert_eq!(toc.pages, vec![2]);
    }

    #[test]
    fn test_contents_line_is_not_a_heading() {
        // Without a heading page, only entry-shaped lines are taken
        let d = doc(&["Box overview\nContents\nScrews 4\nPanel rev 2", "Body text only."]);
        assert!(locate_toc(&d.pages, 16).is_empty());

        let d = doc(&["CONTENTS\n1 Safety 4\nRevision 2", "Body text only."]);
        let toc = locate_toc(&d.pages, 16);
        assert_eq!(toc.lines, vec!["1 Safety 4"]);
    }

    #[test]
    fn test_contents_only_page_is_a_heading() {
        assert!(TOC_HEADING.is_match("  Contents \n"));
        assert!(TOC_HEADING.is_match("Pump Manual\nTABLE OF CONTENTS\n1 Safety 4"));
        assert!(!TOC_HEADING.is_match("Box overview\nContents\nScrews 4"));
    }

    #[test]
    fn test_brute_force_without_heading() {
        let d = doc(&["Cover page", "1 Safety 4\n2 Installation 9", "plain prose"]);
        let toc = locate_toc(&d.pages, 16);
        assert_eq!(toc.lines, vec!["1 Safety 4", "2 Installation 9"]);
        assert_eq!(toc.pages, vec![2]);
    }

    #[test]
    fn test_extends_across_pages_until_empty_page() {
        let d = doc(&[
            "Table of Contents\n1 Safety 4\n2 Installation 9",
            "3 Operation 14\n4 Maintenance 20",
            "5 Disposal 31",
            "Introduction\nThis manual covers the pump.",
            "6 Late numbered line 40",
        ]);
        let toc = locate_toc(&d.pages, 16);
        assert_eq!(toc.pages, vec![1, 2, 3]);
        assert_eq!(toc.lines.len(), 5);
        assert!(!toc.lines.iter().any(|l| l.contains("Late")));
    }

    #[test]
    fn test_extension_is_bounded_by_budget() {
        let d = doc(&[
            "Table of Contents\n1 A 4",
            "2 B 5",
            "3 C 6",
            "4 D 7",
            "5 E 8",
        ]);
        // budget 2 -> at most 2 extra pages
        let toc = locate_toc(&d.pages, 2);
        assert_eq!(toc.pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_toc() {
        let d = doc(&["Just prose here.", "More prose, nothing numbered."]);
        let toc = locate_toc(&d.pages, 16);
        assert!(toc.is_empty());
        assert!(toc.pages.is_empty());
    }

    #[test]
    fn test_budget_window_beyond_heading_scan() {
        let mut texts = vec!["prose"; 7];
        texts.push("1 Safety 4");
        let d = doc(&texts);
        assert!(locate_toc(&d.pages, 4).is_empty());
        let toc = locate_toc(&d.pages, 10);
        assert_eq!(toc.pages, vec![8]);
    }

    #[test]
    fn test_empty_document() {
        assert!(locate_toc(&[], 16).is_empty());
    }
}
