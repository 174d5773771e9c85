//! Education scanner.
//!
//! Every line containing a degree term opens an entry. The entry is completed
//! from its neighbours before the scan moves on:
//! - institute: nearest preceding line (within `institute_lookback`) naming an
//!   institution;
//! - dates: first date range on the anchor line or the next `date_lookahead`
//!   lines.
//!
//! An entry never stays open past its anchor line: it is pushed in the same
//! step that opened it.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::dates::{find_date_range, DateRange};
use crate::extraction::models::EducationEntry;
use crate::extraction::vocabulary::{ExtractorConfig, TermSet};

static MAJOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:majoring in|major in|speciali[sz]ing in|speciali[sz]ation in|in)\s+(?P<major>[^,;|()]+)",
    )
    .expect("valid regex")
});
static PAREN_MAJOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<major>[^()]+)\)").expect("valid regex"));

/// Compiled education scanner.
#[derive(Debug, Clone)]
pub struct EducationScanner {
    degrees: TermSet,
    institutions: TermSet,
    date_lookahead: usize,
    institute_lookback: usize,
}

impl EducationScanner {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            degrees: TermSet::new(&config.degree_keywords, false),
            institutions: TermSet::new(&config.institution_keywords, false),
            date_lookahead: config.date_lookahead,
            institute_lookback: config.institute_lookback,
        }
    }

    pub fn is_anchor(&self, line: &str) -> bool {
        self.degrees.matches(line)
    }

    /// All education entries in discovery order (untruncated).
    pub fn scan(&self, lines: &[String]) -> Vec<EducationEntry> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_anchor(line))
            .map(|(idx, _)| self.open_entry(lines, idx))
            .collect()
    }

    fn open_entry(&self, lines: &[String], idx: usize) -> EducationEntry {
        let anchor = &lines[idx];
        EducationEntry::new(
            anchor.as_str(),
            extract_major(anchor),
            self.institute_before(lines, idx),
            self.dates_from(lines, idx),
        )
    }

    fn institute_before(&self, lines: &[String], idx: usize) -> Option<String> {
        let start = idx.saturating_sub(self.institute_lookback);
        lines
            .get(start..idx)?
            .iter()
            .rev()
            .find(|line| self.institutions.matches(line))
            .cloned()
    }

    fn dates_from(&self, lines: &[String], idx: usize) -> Option<DateRange> {
        let end = idx.saturating_add(self.date_lookahead).min(lines.len().saturating_sub(1));
        lines
            .get(idx..=end)?
            .iter()
            .find_map(|line| find_date_range(line))
    }
}

/// Words that grade a qualification rather than name a subject.
const HONOURS_WORDS: &[&str] = &[
    "hons", "honours", "honors", "with", "first", "second", "third", "1st", "2nd", "3rd",
    "upper", "lower", "class", "division", "distinction", "merit", "credit", "pass", "cum",
    "magna", "summa", "laude",
];

/// Field of study named in a qualification line, if any.
///
/// `in <subject>` phrases are tried before parenthesised text; the first
/// candidate that names a subject wins.
fn extract_major(qualification: &str) -> Option<String> {
    let without_dates = match find_date_range(qualification) {
        Some(range) => qualification[..range.start].trim_end(),
        None => qualification,
    };

    MAJOR_RE
        .captures_iter(without_dates)
        .chain(PAREN_MAJOR_RE.captures_iter(without_dates))
        .filter_map(|caps| caps.name("major"))
        .find_map(|candidate| subject(candidate.as_str()))
}

/// Strips a trailing grade (`with Honours`) and rejects years and bare grades.
fn subject(candidate: &str) -> Option<String> {
    let mut words: Vec<&str> = candidate.split_whitespace().collect();
    while words.last().is_some_and(|w| is_honours_word(w)) {
        words.pop();
    }
    let joined = words.join(" ");
    let major = joined.trim_end_matches(['-', '–', '—', ':']).trim();

    let starts_with_digit = major.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || !major.chars().any(char::is_alphabetic) {
        return None;
    }
    Some(major.to_string())
}

fn is_honours_word(word: &str) -> bool {
    let word = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_ascii_lowercase();
    HONOURS_WORDS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scanner() -> EducationScanner {
        EducationScanner::new(&ExtractorConfig::default())
    }

    #[test]
    fn test_institute_lookback_and_date_lookahead() {
        let entries =
            scanner().scan(&lines(&["ABC University", "Bachelor of Science", "2015 - 2019"]));
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.institute_school, "ABC University");
        assert_eq!(e.qualification, "Bachelor of Science");
        assert_eq!(e.from, "2015");
        assert_eq!(e.to, "2019");
        assert_eq!(e.major_department, "");
    }

    #[test]
    fn test_preceding_line_without_institution_leaves_institute_empty() {
        let entries =
            scanner().scan(&lines(&["EDUCATION", "Diploma in Business", "2012 - 2015"]));
        assert_eq!(entries[0].institute_school, "");
        assert_eq!(entries[0].major_department, "Business");
    }

    #[test]
    fn test_date_outside_window_is_ignored() {
        let entries = scanner().scan(&lines(&[
            "Bachelor of Arts",
            "Dean's list",
            "Hall president",
            "2010 - 2014",
        ]));
        assert_eq!(entries[0].from, "");
        assert_eq!(entries[0].to, "");
    }

    #[test]
    fn test_date_on_anchor_line() {
        let entries =
            scanner().scan(&lines(&["Master of Engineering (Civil) Aug 2016 - May 2018"]));
        assert_eq!(entries[0].from, "Aug 2016");
        assert_eq!(entries[0].to, "May 2018");
        assert_eq!(entries[0].major_department, "Civil");
    }

    #[test]
    fn test_honours_grades_are_not_majors() {
        assert_eq!(extract_major("Bachelor of Engineering (Hons)"), None);
        assert_eq!(extract_major("Diploma (Merit)"), None);
        assert_eq!(extract_major("BSc (First Class Honours)"), None);
        assert_eq!(extract_major("Bachelor of Arts (Second Upper)"), None);
    }

    #[test]
    fn test_major_found_past_a_grade() {
        assert_eq!(
            extract_major("Bachelor of Science (Honours) in Physics").as_deref(),
            Some("Physics")
        );
        assert_eq!(
            extract_major("Bachelor of Engineering (Hons) (Mechanical)").as_deref(),
            Some("Mechanical")
        );
        assert_eq!(
            extract_major("Bachelor of Science in Chemistry with Honours").as_deref(),
            Some("Chemistry")
        );
    }

    #[test]
    fn test_years_and_symbols_are_not_majors() {
        assert_eq!(extract_major("Diploma obtained in 2012"), None);
        assert_eq!(extract_major("Diploma (---)"), None);
        let entries = scanner().scan(&lines(&["Bachelor of Engineering (Hons)", "2010 - 2014"]));
        assert_eq!(entries[0].major_department, "");
        assert_eq!(entries[0].from, "2010");
    }

    #[test]
    fn test_window_stops_at_end_of_document() {
        let entries = scanner().scan(&lines(&["Nanyang Polytechnic", "Diploma in IT"]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institute_school, "Nanyang Polytechnic");
        assert_eq!(entries[0].from, "");
    }

    #[test]
    fn test_each_anchor_yields_one_entry_in_order() {
        let entries = scanner().scan(&lines(&[
            "National University of Singapore",
            "Bachelor of Computing in Computer Science",
            "2014 - 2018",
            "Ngee Ann Polytechnic",
            "Diploma in Information Technology",
            "2011 - 2014",
            "GCE O Level",
        ]));
        let quals: Vec<&str> = entries.iter().map(|e| e.qualification.as_str()).collect();
        assert_eq!(
            quals,
            vec![
                "Bachelor of Computing in Computer Science",
                "Diploma in Information Technology",
                "GCE O Level"
            ]
        );
        assert_eq!(entries[0].major_department, "Computer Science");
        assert_eq!(entries[1].institute_school, "Ngee Ann Polytechnic");
        assert_eq!(entries[1].from, "2011");
    }

    #[test]
    fn test_configurable_windows() {
        let config = ExtractorConfig {
            date_lookahead: 3,
            institute_lookback: 2,
            ..ExtractorConfig::default()
        };
        let entries = EducationScanner::new(&config).scan(&lines(&[
            "Temasek Polytechnic",
            "Singapore",
            "Diploma in Design",
            "Honours",
            "Merit award",
            "2008 - 2011",
        ]));
        assert_eq!(entries[0].institute_school, "Temasek Polytechnic");
        assert_eq!(entries[0].from, "2008");
    }

    #[test]
    fn test_zero_lookback_and_lookahead() {
        let config = ExtractorConfig {
            date_lookahead: 0,
            institute_lookback: 0,
            ..ExtractorConfig::default()
        };
        let entries = EducationScanner::new(&config)
            .scan(&lines(&["ABC University", "Bachelor of Science", "2015 - 2019"]));
        assert_eq!(entries[0].institute_school, "");
        assert_eq!(entries[0].from, "");
    }

    #[test]
    fn test_no_anchor_no_entries() {
        assert!(scanner().scan(&lines(&["Software Engineer", "2019 - 2021"])).is_empty());
        assert!(scanner().scan(&[]).is_empty());
    }
}
