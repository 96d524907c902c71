//! Dot-leader and bullet cleanup for candidate ToC lines.

use regex::Regex;
use std::sync::LazyLock;

/// Glyphs used as leaders or bullets between a title and its page number.
const LEADER_GLYPHS: &[char] = &[
    '\u{2022}', // bullet
    '\u{00B7}', // middle dot
    '\u{2026}', // horizontal ellipsis
    '\u{2024}', // one dot leader
    '\u{2025}', // two dot leader
    '\u{2219}', // bullet operator
];

/// Two or more literal dots, optionally spaced (`....`, `. . .`).
static DOT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(?:\s*\.)+").expect("dot run pattern is valid"));

/// Normalize one raw line for entry matching.
///
/// Leader glyphs and runs of dots become a single space, whitespace runs
/// collapse to one space, and the ends are trimmed. Single dots are kept
/// so numbering such as `1.2` survives.
pub fn normalize_line(line: &str) -> String {
    let replaced: String = line
        .chars()
        .map(|c| if LEADER_GLYPHS.contains(&c) { ' ' } else { c })
        .collect();
    let replaced = DOT_RUN.replace_all(&replaced, " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_dot_leaders() {
        assert_eq!(
            normalize_line("1.2 General rules ............ 4"),
            "1.2 General rules 4"
        );
        assert_eq!(normalize_line("2 Installation . . . . 9"), "2 Installation 9");
    }

    #[test]
    fn test_glyph_leaders() {
        assert_eq!(normalize_line("3 Wiring \u{2026}\u{2026} 12"), "3 Wiring 12");
        assert_eq!(normalize_line("\u{2022} 4 Use \u{00B7}\u{00B7}\u{00B7} 20"), "4 Use 20");
    }

    #[test]
    fn test_keeps_numbering_dots() {
        assert_eq!(normalize_line("  1.2.3   Scope   7 "), "1.2.3 Scope 7");
        assert_eq!(normalize_line("A.1 Tables 30"), "A.1 Tables 30");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line(" \t ... "), "");
    }
}
