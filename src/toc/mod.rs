//! Table-of-contents detection and parsing.
//!
//! A ToC is located in the leading pages of a document ([`locate_toc`]),
//! its lines are cleaned of dot leaders ([`normalize_line`]) and then
//! classified into [`TocEntry`] records ([`parse_toc_lines`]).

mod locator;
mod matcher;
mod normalize;

pub use locator::{LocatedToc, HEADING_SCAN_PAGES, locate_toc};
pub use matcher::{EntryFormat, TocEntry, is_toc_line, match_entry, parse_toc_lines};
pub use normalize::normalize_line;
