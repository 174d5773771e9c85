//! Name detector: a positional guess, not a recogniser.
//!
//! Resumes almost always open with the candidate's name, so the first line is
//! taken as-is. All-caps headers (`JOHN TAN WEI MING`) are re-cased word by word.
//! Logos rendered as text, or a header line above the name, defeat this; the
//! result is a best-effort default.

use crate::extraction::normalize::NormalizedDocument;

pub fn detect_name(doc: &NormalizedDocument) -> String {
    let Some(first) = doc.lines().first() else {
        return String::new();
    };
    if is_all_caps(first) {
        title_case(first)
    } else {
        first.clone()
    }
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_alphabetic) && !line.chars().any(char::is_lowercase)
}

fn title_case(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::normalize::normalize;

    fn name_of(raw: &str) -> String {
        detect_name(&normalize(raw, &[]))
    }

    #[test]
    fn test_first_line_verbatim() {
        assert_eq!(name_of("\n\n  Jane van der Berg \nEngineer"), "Jane van der Berg");
    }

    #[test]
    fn test_all_caps_is_title_cased() {
        assert_eq!(name_of("JOHN TAN WEI MING\nSingapore"), "John Tan Wei Ming");
        assert_eq!(name_of("MARY-ANN O'NEIL"), "Mary-ann O'neil");
    }

    #[test]
    fn test_no_letters_is_left_alone() {
        assert_eq!(name_of("+65 9123 4567"), "+65 9123 4567");
    }

    #[test]
    fn test_empty_document_has_no_name() {
        assert_eq!(name_of(""), "");
    }
}
