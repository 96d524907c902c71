//! Outliner - reconstructs the section structure of a document.
//!
//! The pipeline:
//! 1. Locate the table of contents in the leading pages
//! 2. Optionally send the located lines through a repair service
//! 3. Parse entries and build flat sections with page spans
//! 4. Link sections into a hierarchy by numbering
//!
//! When no ToC is found (or ToC use is disabled) the document is split by
//! the configured fallback mode instead, giving flat depth-1 sections.

use crate::config::OutlineConfig;
use crate::document::{Document, Page};
use crate::fallback::{FallbackMode, fallback_sections};
use crate::repair::{NoRepair, TocRepair};
use crate::section::{Section, apply_slug_prefix, build_sections};
use crate::toc::{LocatedToc, locate_toc, parse_toc_lines};
use crate::tree::{DocumentTree, assemble_hierarchy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where an outline's sections came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutlineSource {
    /// Parsed from a table of contents.
    Toc {
        /// Pages the ToC lines were taken from.
        pages: Vec<usize>,
        /// Whether the repair service changed the lines.
        repaired: bool,
    },
    /// Produced by a fallback segmentation.
    Fallback {
        /// Segmentation strategy that produced the sections.
        mode: FallbackMode,
    },
}

/// The structure of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    /// Rooted section tree.
    pub tree: DocumentTree,
    /// The same sections, flat and in page order.
    pub sections: Vec<Section>,
    /// How the sections were obtained.
    pub source: OutlineSource,
}

impl Outline {
    /// Depth-1 sections in page order.
    pub fn top_level(&self) -> Vec<&Section> {
        self.sections.iter().filter(|s| s.depth == 1).collect()
    }

    /// Whether the outline came from a table of contents.
    pub fn from_toc(&self) -> bool {
        matches!(self.source, OutlineSource::Toc { .. })
    }

    /// The trimmed, table-transformed pages a section covers.
    pub fn section_pages(&self, document: &Document, section: &Section) -> Vec<Page> {
        document.section_pages(section.start_page, section.end_page)
    }
}

/// Build an outline without a repair pass.
pub fn outline_document(document: &Document, options: &OutlineConfig) -> Outline {
    let located = if options.use_toc {
        locate_toc(&document.pages, options.effective_scan_budget())
    } else {
        LocatedToc::default()
    };
    outline_from_toc(document, options, located, false)
}

fn outline_from_toc(
    document: &Document,
    options: &OutlineConfig,
    located: LocatedToc,
    repaired: bool,
) -> Outline {
    let entries = parse_toc_lines(&located.lines);
    let mut sections = build_sections(&entries, options.max_depth);
    if sections.is_empty() {
        return fallback_outline(document, options);
    }

    if let Some(prefix) = &options.slug_prefix {
        apply_slug_prefix(&mut sections, prefix);
    }

    let roots = assemble_hierarchy(sections.clone());
    info!(
        document = %document.name,
        toc_lines = located.lines.len(),
        entries = entries.len(),
        sections = sections.len(),
        roots = roots.len(),
        "built outline from table of contents"
    );

    Outline {
        tree: DocumentTree::new(&document.name, roots, document.page_count()),
        sections,
        source: OutlineSource::Toc {
            pages: located.pages,
            repaired,
        },
    }
}

fn fallback_outline(document: &Document, options: &OutlineConfig) -> Outline {
    let mode = options.fallback_mode;
    let mut sections = fallback_sections(&document.pages, mode);
    if let Some(prefix) = &options.slug_prefix {
        apply_slug_prefix(&mut sections, prefix);
    }

    info!(
        document = %document.name,
        mode = %mode,
        sections = sections.len(),
        "no table of contents, using fallback segmentation"
    );

    Outline {
        tree: DocumentTree::new(&document.name, sections.clone(), document.page_count()),
        sections,
        source: OutlineSource::Fallback { mode },
    }
}

/// Outline builder with an optional ToC repair service.
pub struct Outliner<R = NoRepair> {
    repair: R,
    options: OutlineConfig,
}

impl Outliner<NoRepair> {
    /// Create an outliner that uses located ToC lines as they are.
    pub fn new(options: OutlineConfig) -> Self {
        Self {
            repair: NoRepair,
            options,
        }
    }
}

impl<R: TocRepair> Outliner<R> {
    /// Create with a repair service.
    pub fn with_repair(repair: R, options: OutlineConfig) -> Self {
        Self { repair, options }
    }

    /// Settings in use.
    pub fn options(&self) -> &OutlineConfig {
        &self.options
    }

    /// Build the outline of a document.
    ///
    /// The repair service is called at most once, and only when ToC lines
    /// were located. Its failures never reach the caller.
    pub async fn outline(&self, document: &Document) -> Outline {
        if !self.options.use_toc {
            return fallback_outline(document, &self.options);
        }

        let mut located = locate_toc(&document.pages, self.options.effective_scan_budget());
        if located.is_empty() {
            return fallback_outline(document, &self.options);
        }

        debug!(
            lines = located.lines.len(),
            pages = ?located.pages,
            "located table of contents"
        );

        let (lines, repaired) = self.repair_lines(located.lines).await;
        located.lines = lines;
        outline_from_toc(document, &self.options, located, repaired)
    }

    /// Run the repair service, keeping the input on any kind of failure.
    async fn repair_lines(&self, lines: Vec<String>) -> (Vec<String>, bool) {
        match self.repair.repair(&lines).await {
            Ok(fixed) if parse_toc_lines(&fixed).is_empty() => {
                warn!(
                    returned = fixed.len(),
                    "toc repair gave no usable entries, keeping located lines"
                );
                (lines, false)
            }
            Ok(fixed) => {
                let changed = fixed != lines;
                if changed {
                    info!(before = lines.len(), after = fixed.len(), "applied toc repair");
                }
                (fixed, changed)
            }
            Err(err) => {
                warn!(error = %err, "toc repair failed, keeping located lines");
                (lines, false)
            }
        }
    }
}
