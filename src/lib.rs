//! Document Outline - reconstructs the section hierarchy of long documents.
//!
//! Given the plain text of each page of a document (typically a PDF run
//! through a text extractor), this library finds the table of contents,
//! parses its entries and rebuilds a tree of numbered sections with page
//! ranges. Documents without a usable ToC are split by headings or by page.
//!
//! # Quick Start
//!
//! ```no_run
//! use doc_outline::{
//!     config::Config,
//!     document::Document,
//!     outliner::Outliner,
//!     persistence::save_tree,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     // Pages separated by form feeds, as written by pdftotext
//!     let document = Document::from_text_file(Path::new("manual.txt"))?;
//!
//!     let outliner = Outliner::new(config.outline);
//!     let outline = outliner.outline(&document).await;
//!
//!     print!("{}", outline.tree.format());
//!     save_tree(&outline.tree, Path::new("outline.json"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **toc**: locating ToC lines, cleaning dot leaders, classifying entries
//! - **section**: flat sections with page spans and slugs
//! - **tree**: linking sections into a hierarchy by numbering
//! - **fallback**: heading- or page-based splitting when no ToC exists
//! - **table**: rewriting space-aligned text as Markdown tables
//! - **repair**: optional LLM cleanup of located ToC lines
//! - **outliner**: the pipeline tying these together

pub mod config;
pub mod document;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod outliner;
pub mod persistence;
pub mod repair;
pub mod section;
pub mod table;
pub mod toc;
pub mod tree;

// Re-export commonly used types
pub use config::{Config, OutlineConfig};
pub use document::{Document, Page};
pub use error::{OutlineError, Result};
pub use fallback::FallbackMode;
pub use outliner::{Outline, OutlineSource, Outliner, outline_document};
pub use persistence::{load_tree, save_tree};
pub use repair::{LlmTocRepair, NoRepair, TocRepair};
pub use section::Section;
pub use table::transform_tables;
pub use tree::{DocumentTree, assemble_hierarchy};
