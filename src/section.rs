//! Flat section records built from ToC entries.

use crate::toc::TocEntry;
use bincode::{Decode, Encode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Depth cutoff used when the configured maximum is zero.
pub const DEFAULT_MAX_DEPTH: usize = 10;

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"));

/// A section of the document with its page span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Section {
    /// Numbering token (e.g., "1", "1.2", "A.1", "IV").
    pub number: String,

    /// Section title.
    pub title: String,

    /// First page of the section (1-indexed).
    pub start_page: usize,

    /// Last page of the section (1-indexed, inclusive).
    pub end_page: usize,

    /// Nesting level, 1 for top level.
    pub depth: usize,

    /// URL-safe identifier.
    pub slug: String,

    /// Subsections in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Section>,
}

impl Section {
    /// Create a childless section, deriving the slug from number and title.
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        start_page: usize,
        end_page: usize,
        depth: usize,
    ) -> Self {
        let number = number.into();
        let title = title.into();
        let slug = slugify(&format!("{}-{}", number, title));
        Self {
            number,
            title,
            start_page,
            end_page,
            depth,
            slug,
            children: Vec::new(),
        }
    }

    /// Replace the slug.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Recursively count all sections in this subtree (including self).
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Section::node_count).sum::<usize>()
    }
}

/// Turn text into a lowercase, hyphen-separated identifier.
///
/// Runs of anything other than ASCII letters and digits collapse to a
/// single hyphen. Titles differing only in punctuation share a slug.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_SLUG.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// Build flat sections from page-ordered entries.
///
/// Entries deeper than `max_depth` are dropped (0 means
/// [`DEFAULT_MAX_DEPTH`]). A section ends the page before the next entry
/// starts, but never before its own start page; the last one ends where it
/// starts.
pub fn build_sections(entries: &[TocEntry], max_depth: usize) -> Vec<Section> {
    let max_depth = if max_depth == 0 {
        DEFAULT_MAX_DEPTH
    } else {
        max_depth
    };

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.depth <= max_depth)
        .map(|(i, entry)| {
            let end_page = entries
                .get(i + 1)
                .map(|next| next.page.saturating_sub(1).max(entry.page))
                .unwrap_or(entry.page);
            Section::new(&entry.number, &entry.title, entry.page, end_page, entry.depth)
        })
        .collect()
}

/// Prefix every slug, re-slugifying the combination.
pub fn apply_slug_prefix(sections: &mut [Section], prefix: &str) {
    if prefix.trim().is_empty() {
        return;
    }
    for section in sections {
        section.slug = slugify(&format!("{}-{}", prefix, section.slug));
    }
}
