//! Recognition of space-aligned plain-text tables.
//!
//! Text extracted from PDFs keeps column layout as runs of spaces. A run of
//! two or more consecutive lines that split into the same number (at least
//! two) of fields on 2+ whitespace gaps is taken as a table, with the first
//! line as its header. Everything else passes through untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Longest run of rows folded into one table.
pub const MAX_TABLE_ROWS: usize = 50;

static COLUMN_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("column gap pattern is valid"));

/// A table recovered from aligned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTable {
    /// Header cells.
    pub header: Vec<String>,
    /// Data rows, each with as many cells as the header.
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Render as a Markdown pipe table: header, separator, then data rows.
    pub fn to_markdown(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(markdown_row(&self.header));
        lines.push(markdown_row(&vec!["---".to_string(); self.width()]));
        lines.extend(self.rows.iter().map(|row| markdown_row(row)));
        lines.join("\n")
    }
}

fn markdown_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// A piece of page text: an untouched line or a detected table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Line(&'a str),
    Table(TextTable),
}

/// Split a line into trimmed fields on 2+ whitespace gaps.
fn split_columns(line: &str) -> Vec<String> {
    COLUMN_GAP
        .split(line.trim())
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Break page text into lines and tables, in order.
pub fn segment_tables(text: &str) -> Vec<Segment<'_>> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let mut block: Vec<Vec<String>> = Vec::new();
        let mut j = i;
        while j < lines.len() && block.len() < MAX_TABLE_ROWS {
            let line = lines[j].trim_end();
            if line.trim().is_empty() {
                break;
            }
            let cells = split_columns(line);
            if cells.len() < 2 || block.first().is_some_and(|first| first.len() != cells.len()) {
                break;
            }
            block.push(cells);
            j += 1;
        }

        if block.len() >= 2 {
            let mut rows = block.into_iter();
            let header = rows.next().unwrap_or_default();
            segments.push(Segment::Table(TextTable {
                header,
                rows: rows.collect(),
            }));
            i = j;
        } else {
            segments.push(Segment::Line(lines[i]));
            i += 1;
        }
    }

    segments
}

/// Collect only the tables found in page text.
pub fn detect_tables(text: &str) -> Vec<TextTable> {
    segment_tables(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Table(table) => Some(table),
            Segment::Line(_) => None,
        })
        .collect()
}

/// Rewrite aligned tables in page text as Markdown tables.
pub fn transform_tables(text: &str) -> String {
    segment_tables(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Line(line) => line.to_string(),
            Segment::Table(table) => table.to_markdown(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
