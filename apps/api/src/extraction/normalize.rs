//! Text normalizer — turns decoder output into a clean line sequence.

use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\u{00A0}\u{2007}\u{202F}]+").expect("valid regex"));

/// Ordered, trimmed, non-empty lines of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedDocument {
    lines: Vec<String>,
    text: String,
}

impl NormalizedDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The lines joined with `\n`; what whole-text scanners search.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Replaces bullet glyphs with line breaks, collapses horizontal whitespace,
/// then keeps every non-empty trimmed line in order.
pub fn normalize(raw: &str, bullet_glyphs: &[char]) -> NormalizedDocument {
    let unbulleted: String = raw
        .chars()
        .map(|c| if bullet_glyphs.contains(&c) { '\n' } else { c })
        .collect();
    let collapsed = HORIZONTAL_WS_RE.replace_all(&unbulleted, " ");

    let lines: Vec<String> = collapsed
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    let text = lines.join("\n");

    NormalizedDocument { lines, text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::vocabulary::ExtractorConfig;

    fn norm(raw: &str) -> NormalizedDocument {
        normalize(raw, &ExtractorConfig::default().bullet_glyphs)
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(norm("").lines().is_empty());
        assert!(norm("  \n\t\n \r\n").lines().is_empty());
        assert_eq!(norm("").text(), "");
    }

    #[test]
    fn test_bullets_become_line_breaks() {
        let doc = norm("Skills • Python ● Rust▪Go-to person");
        assert_eq!(doc.lines(), &["Skills", "Python", "Rust", "Go-to person"]);
    }

    #[test]
    fn test_whitespace_collapses_and_lines_trim() {
        let doc = norm("  Jane \t\t Doe  \r\n\n   Engineer\u{00A0}\u{00A0}II ");
        assert_eq!(doc.lines(), &["Jane Doe", "Engineer II"]);
        assert_eq!(doc.text(), "Jane Doe\nEngineer II");
    }

    #[test]
    fn test_hyphens_are_not_bullets() {
        let doc = norm("Jan 2020 - Present\n- Built systems");
        assert_eq!(doc.lines(), &["Jan 2020 - Present", "- Built systems"]);
    }
}
