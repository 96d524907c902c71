//! Section hierarchy for a document.
//!
//! Flat, page-ordered sections are linked into a tree by numbering: a
//! section hangs under the nearest earlier section that is shallower and
//! whose number is a dotted prefix of its own. Links are resolved over an
//! index arena first, then the owned tree is materialized in one pass.

use crate::section::Section;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether `parent` may own `child` by numbering and depth.
///
/// "2" is a valid parent of "2.1" but not of "21".
pub fn is_numbered_parent(parent: &Section, child: &Section) -> bool {
    parent.depth < child.depth
        && child
            .number
            .strip_prefix(parent.number.as_str())
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Link flat sections into a tree and return the roots.
///
/// Each section is attached as the last child of its nearest eligible
/// ancestor (see [`is_numbered_parent`]); sections without one become
/// roots, so nothing is dropped. Parents are widened to end no earlier
/// than their last descendant.
pub fn assemble_hierarchy(flat: Vec<Section>) -> Vec<Section> {
    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];

    for (i, section) in flat.iter().enumerate() {
        let parent = (0..i)
            .rev()
            .find(|&j| is_numbered_parent(&flat[j], section));
        match parent {
            Some(j) => children[j].push(i),
            None => {
                if section.depth > 1 {
                    debug!(
                        number = %section.number,
                        depth = section.depth,
                        "no numbered ancestor, promoting section to root"
                    );
                }
                roots.push(i);
            }
        }
    }

    let mut arena: Vec<Option<Section>> = flat.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|i| materialize(i, &mut arena, &children))
        .collect()
}

fn materialize(
    index: usize,
    arena: &mut [Option<Section>],
    children: &[Vec<usize>],
) -> Option<Section> {
    let mut section = arena[index].take()?;
    for &child in &children[index] {
        if let Some(child) = materialize(child, arena, children) {
            section.end_page = section.end_page.max(child.end_page);
            section.children.push(child);
        }
    }
    Some(section)
}

/// Flatten a tree depth-first, preserving sibling order.
///
/// The returned sections have no children.
pub fn flatten_sections(sections: &[Section]) -> Vec<Section> {
    fn walk(section: &Section, out: &mut Vec<Section>) {
        let mut flat = section.clone();
        flat.children = Vec::new();
        out.push(flat);
        for child in &section.children {
            walk(child, out);
        }
    }

    let mut out = Vec::new();
    for section in sections {
        walk(section, &mut out);
    }
    out
}

/// A complete document outline (wrapper around root sections).
#[derive(Debug, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct DocumentTree {
    /// Document name.
    pub name: String,

    /// Root-level sections.
    pub sections: Vec<Section>,

    /// Total page count.
    pub total_pages: usize,
}

impl DocumentTree {
    /// Create a new document tree.
    pub fn new(name: impl Into<String>, sections: Vec<Section>, total_pages: usize) -> Self {
        Self {
            name: name.into(),
            sections,
            total_pages,
        }
    }

    /// Get total section count.
    pub fn node_count(&self) -> usize {
        self.sections.iter().map(Section::node_count).sum()
    }

    /// Get maximum nesting of the tree.
    pub fn max_depth(&self) -> usize {
        fn depth(section: &Section) -> usize {
            1 + section.children.iter().map(depth).max().unwrap_or(0)
        }

        self.sections.iter().map(depth).max().unwrap_or(0)
    }

    /// Find a section by its numbering token.
    pub fn find_by_number(&self, number: &str) -> Option<&Section> {
        self.find(|s| s.number == number)
    }

    /// Find a section by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Section> {
        self.find(|s| s.slug == slug)
    }

    fn find(&self, pred: impl Fn(&Section) -> bool + Copy) -> Option<&Section> {
        fn search<'a>(
            sections: &'a [Section],
            pred: impl Fn(&Section) -> bool + Copy,
        ) -> Option<&'a Section> {
            for section in sections {
                if pred(section) {
                    return Some(section);
                }
                if let Some(found) = search(&section.children, pred) {
                    return Some(found);
                }
            }
            None
        }

        search(&self.sections, pred)
    }

    /// Flatten the tree depth-first.
    pub fn flatten(&self) -> Vec<Section> {
        flatten_sections(&self.sections)
    }

    /// Format the entire tree for display.
    pub fn format(&self) -> String {
        fn format_section(section: &Section, indent: usize, out: &mut String) {
            out.push_str(&format!(
                "{}{} {} [pages {}-{}]\n",
                "  ".repeat(indent),
                section.number,
                section.title,
                section.start_page,
                section.end_page
            ));
            for child in &section.children {
                format_section(child, indent + 1, out);
            }
        }

        let mut result = format!(
            "Document: {} ({} pages, {} sections)\n",
            self.name,
            self.total_pages,
            self.node_count()
        );
        result.push_str(&"─".repeat(50));
        result.push('\n');

        for section in &self.sections {
            format_section(section, 0, &mut result);
        }

        result
    }

    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
