//! Document representation for the outliner.
//!
//! Documents are an ordered collection of pages, each carrying the plain
//! text a page-text provider extracted for it. Text files produced by
//! `pdftotext` separate pages with a form feed, which is the default
//! delimiter here.

use crate::error::{OutlineError, Result};
use crate::table::transform_tables;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Page separator emitted by common PDF-to-text tools.
pub const FORM_FEED: &str = "\x0c";

/// A single page in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed page number.
    pub number: usize,
    /// Text content of the page.
    pub content: String,
}

impl Page {
    /// Create a new page.
    pub fn new(number: usize, content: impl Into<String>) -> Self {
        Self {
            number,
            content: content.into(),
        }
    }

    /// Iterate over the page's lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// A document consisting of one or more pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name/title.
    pub name: String,
    /// Original file path (if loaded from file).
    pub path: Option<PathBuf>,
    /// Pages in the document.
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new document with given name and pages.
    pub fn new(name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            name: name.into(),
            path: None,
            pages,
        }
    }

    /// Build a document from per-page texts, numbering pages from 1.
    pub fn from_page_texts<I, S>(name: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(i + 1, text))
            .collect();
        Self::new(name, pages)
    }

    /// Load a text file, splitting pages on form feeds.
    pub fn from_text_file(path: &Path) -> Result<Self> {
        Self::from_text_file_with_delimiter(path, FORM_FEED)
    }

    /// Load a text file with custom page delimiter.
    ///
    /// Splits content on the delimiter and treats each part as a page.
    /// A trailing empty part (the delimiter after the last page) is dropped.
    pub fn from_text_file_with_delimiter(path: &Path, delimiter: &str) -> Result<Self> {
        if !path.exists() {
            return Err(OutlineError::DocumentNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| OutlineError::io(path, e))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let mut parts: Vec<&str> = content.split(delimiter).collect();
        while parts.last().is_some_and(|p| p.trim().is_empty()) {
            parts.pop();
        }

        if parts.is_empty() {
            return Err(OutlineError::EmptyDocument(path.to_path_buf()));
        }

        let mut document = Self::from_page_texts(name, parts);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Get total number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a specific page by number (1-indexed).
    pub fn get_page(&self, number: usize) -> Option<&Page> {
        if number == 0 || number > self.pages.len() {
            None
        } else {
            Some(&self.pages[number - 1])
        }
    }

    /// Collect the pages a section spans, ready for the page writer.
    ///
    /// The range is clamped to the document. Each page is trimmed and
    /// has space-aligned tables rewritten as Markdown tables.
    pub fn section_pages(&self, start: usize, end: usize) -> Vec<Page> {
        let start = start.max(1);
        let end = end.min(self.pages.len());
        (start..=end)
            .filter_map(|n| self.get_page(n))
            .map(|p| Page::new(p.number, transform_tables(p.content.trim())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_page_texts() {
        let doc = Document::from_page_texts("Manual", ["one", "two", "three"]);
        assert_eq!(doc.name, "Manual");
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[2].number, 3);
        assert!(doc.path.is_none());
    }

    #[test]
    fn test_document_page_access() {
        let doc = Document::from_page_texts("Test", ["Content"]);

        assert!(doc.get_page(0).is_none()); // 0 is invalid
        assert!(doc.get_page(1).is_some()); // Valid
        assert!(doc.get_page(2).is_none()); // Out of range
    }

    #[test]
    fn test_from_text_file_splits_form_feeds() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "first page\x0csecond page\x0c").unwrap();

        let doc = Document::from_text_file(file.path()).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[1].content, "second page");
        assert!(doc.path.is_some());
    }

    #[test]
    fn test_from_text_file_keeps_blank_inner_pages() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cover\n---\n\n---\nbody").unwrap();

        let doc = Document::from_text_file_with_delimiter(file.path(), "---").unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[2].number, 3);
    }

    #[test]
    fn test_from_text_file_empty() {
        let file = NamedTempFile::new().unwrap();
        let result = Document::from_text_file(file.path());
        assert!(matches!(result, Err(OutlineError::EmptyDocument(_))));
    }

    #[test]
    fn test_from_text_file_missing() {
        let result = Document::from_text_file(Path::new("/nonexistent/doc.txt"));
        assert!(matches!(result, Err(OutlineError::DocumentNotFound(_))));
    }

    #[test]
    fn test_section_pages_clamps_and_transforms() {
        let doc = Document::from_page_texts(
            "Test",
            ["  intro  ", "Name   Qty\nBolt   10", "last"],
        );

        let pages = doc.section_pages(0, 9);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].content, "intro");
        assert_eq!(pages[1].content, "| Name | Qty |\n| --- | --- |\n| Bolt | 10 |");

        assert!(doc.section_pages(3, 2).is_empty());
    }
}
