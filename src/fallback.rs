//! Segmentation for documents without a usable ToC.
//!
//! Both modes produce flat, depth-1 sections.

use crate::document::Page;
use crate::error::OutlineError;
use crate::section::{Section, slugify};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A short capitalized line with plain punctuation.
static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9 ,\-/()]{3,}$").expect("heading line pattern is valid")
});

/// How to split a document when no ToC is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// One section per page.
    #[default]
    Page,
    /// Start a section at each page that opens with a heading-like line.
    Heading,
}

impl FromStr for FallbackMode {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "page" => Ok(FallbackMode::Page),
            "heading" => Ok(FallbackMode::Heading),
            other => Err(OutlineError::InvalidConfig(format!(
                "unknown fallback mode '{}', expected 'page' or 'heading'",
                other
            ))),
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackMode::Page => write!(f, "page"),
            FallbackMode::Heading => write!(f, "heading"),
        }
    }
}

/// Split the document with the given mode.
pub fn fallback_sections(pages: &[Page], mode: FallbackMode) -> Vec<Section> {
    match mode {
        FallbackMode::Page => page_sections(pages),
        FallbackMode::Heading => heading_sections(pages),
    }
}

fn page_sections(pages: &[Page]) -> Vec<Section> {
    (1..=pages.len())
        .map(|n| {
            let title = format!("Page {}", n);
            let slug = slugify(&title);
            Section::new(n.to_string(), title, n, n, 1).with_slug(slug)
        })
        .collect()
}

/// Whether a trimmed line looks like a section heading.
pub fn is_heading_line(line: &str) -> bool {
    HEADING_LINE.is_match(line)
}

fn heading_sections(pages: &[Page]) -> Vec<Section> {
    if pages.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut current = Section::new("1", "Section 1", 1, 1, 1);

    for n in 1..=pages.len() {
        if n != current.start_page {
            let heading = pages[n - 1]
                .lines()
                .map(str::trim)
                .find(|line| is_heading_line(line));
            if let Some(heading) = heading {
                current.end_page = n - 1;
                let next_number = out.len() + 2;
                out.push(current);
                current = Section::new(next_number.to_string(), heading, n, n, 1);
            }
        }
        current.end_page = n;
    }

    out.push(current);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_page_mode() {
        let doc = Document::from_page_texts("t", ["a", "b", "c"]);
        let sections = fallback_sections(&doc.pages, FallbackMode::Page);

        assert_eq!(sections.len(), 3);
        for (i, s) in sections.iter().enumerate() {
            let n = i + 1;
            assert_eq!(s.title, format!("Page {}", n));
            assert_eq!(s.number, n.to_string());
            assert_eq!((s.start_page, s.end_page), (n, n));
            assert_eq!(s.depth, 1);
            assert!(s.children.is_empty());
        }
        assert_eq!(sections[2].slug, "page-3");
    }

    #[test]
    fn test_heading_mode() {
        let doc = Document::from_page_texts(
            "t",
            [
                "Overview\nintro text",
                "more intro text.",
                "Installation\nsteps follow",
                "step four.",
                "Maintenance Schedule\nweekly checks",
            ],
        );
        let sections = fallback_sections(&doc.pages, FallbackMode::Heading);

        let summary: Vec<(&str, &str, usize, usize)> = sections
            .iter()
            .map(|s| (s.number.as_str(), s.title.as_str(), s.start_page, s.end_page))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("1", "Section 1", 1, 2),
                ("2", "Installation", 3, 4),
                ("3", "Maintenance Schedule", 5, 5),
            ]
        );
        assert_eq!(sections[1].slug, "2-installation");
        assert!(sections.iter().all(|s| s.depth == 1));
    }

    #[test]
    fn test_heading_mode_without_headings() {
        let doc = Document::from_page_texts("t", ["lower case only.", "still prose."]);
        let sections = fallback_sections(&doc.pages, FallbackMode::Heading);
        assert_eq!(sections.len(), 1);
        assert_eq!((sections[0].start_page, sections[0].end_page), (1, 2));
    }

    #[test]
    fn test_empty_document() {
        assert!(fallback_sections(&[], FallbackMode::Page).is_empty());
        assert!(fallback_sections(&[], FallbackMode::Heading).is_empty());
    }

    #[test]
    fn test_heading_line() {
        assert!(is_heading_line("Safety Instructions"));
        assert!(is_heading_line("Setup (Part 1)"));
        assert!(!is_heading_line("Ok"));
        assert!(!is_heading_line("lowercase heading"));
        assert!(!is_heading_line("Ends with a period."));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("page".parse::<FallbackMode>().unwrap(), FallbackMode::Page);
        assert_eq!(" Heading ".parse::<FallbackMode>().unwrap(), FallbackMode::Heading);
        assert!("chapter".parse::<FallbackMode>().is_err());
        assert_eq!(FallbackMode::Heading.to_string(), "heading");
    }
}
