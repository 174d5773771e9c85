//! Work-experience scanner — line-role classification plus an explicit accumulator.
//!
//! # Decision table
//! Each line gets exactly one role, tried in this order:
//!
//! | # | Role               | Rule                                                        |
//! |---|--------------------|-------------------------------------------------------------|
//! | 1 | `CompanyAnchor`    | company suffix (`PTE LTD`, `SDN BHD`, `INC`, ...) or `<title> at <company>` |
//! | 2 | `DateRange`        | contains `<from> - <to>`                                    |
//! | 3 | `ReasonForLeaving` | `Reason for Leaving: ...`                                   |
//! | 4 | `Description`      | anything else, leading bullet punctuation stripped          |
//!
//! # Transitions
//! - `CompanyAnchor`: close the open entry, open a new one seeded from the line.
//! - `DateRange`: open a blank entry first when idle; set From/To.
//! - `ReasonForLeaving` / `Description`: update the open entry; dropped when idle.
//! - End of input: flush the open entry.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::dates::{find_date_range, DateRange};
use crate::extraction::models::WorkExperienceEntry;
use crate::extraction::vocabulary::{ExtractorConfig, TermSet};

static TITLE_AT_COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[^@|]+?)\s+(?:at|@)\s+(?P<company>[\p{Lu}\d].*)$")
        .expect("valid regex")
});
static REASON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\W*reasons?\s+(?:for|of)\s+leaving\s*(?::|[-–]\s)?\s*(?P<reason>.*)$")
        .expect("valid regex")
});
static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[\-*–—·•●▪◦‣>~]+\s*|o\s+)").expect("valid regex"));

const SEPARATORS: &[char] = &[' ', ',', '|', '-', '–', '—', '(', ')', ':', '/'];

/// The role a single line plays in the work-experience section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRole {
    CompanyAnchor {
        company: String,
        title: Option<String>,
        dates: Option<DateRange>,
    },
    DateRange {
        dates: DateRange,
        title: Option<String>,
    },
    ReasonForLeaving(String),
    Description(String),
}

/// Accumulator state: at most one entry is open at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkState {
    Idle,
    Open(WorkExperienceEntry),
}

impl WorkState {
    /// Applies one classified line. Closed entries are pushed onto `closed`.
    pub fn step(self, role: LineRole, closed: &mut Vec<WorkExperienceEntry>) -> WorkState {
        match (self, role) {
            (
                state,
                LineRole::CompanyAnchor {
                    company,
                    title,
                    dates,
                },
            ) => {
                state.close(closed);
                let mut entry = WorkExperienceEntry::for_company(company, title);
                if let Some(dates) = dates {
                    entry.set_dates(dates);
                }
                WorkState::Open(entry)
            }
            (WorkState::Idle, LineRole::DateRange { dates, title }) => {
                let mut entry = WorkExperienceEntry::blank();
                apply_dates(&mut entry, dates, title);
                WorkState::Open(entry)
            }
            (WorkState::Open(mut entry), LineRole::DateRange { dates, title }) => {
                apply_dates(&mut entry, dates, title);
                WorkState::Open(entry)
            }
            (WorkState::Open(mut entry), LineRole::ReasonForLeaving(reason)) => {
                entry.reason_for_leaving = reason;
                WorkState::Open(entry)
            }
            (WorkState::Open(mut entry), LineRole::Description(text)) => {
                entry.push_description(&text);
                WorkState::Open(entry)
            }
            (WorkState::Idle, LineRole::ReasonForLeaving(_) | LineRole::Description(_)) => {
                WorkState::Idle
            }
        }
    }

    /// Pushes the open entry, if any.
    pub fn close(self, closed: &mut Vec<WorkExperienceEntry>) {
        if let WorkState::Open(entry) = self {
            closed.push(entry);
        }
    }
}

fn apply_dates(entry: &mut WorkExperienceEntry, dates: DateRange, title: Option<String>) {
    entry.set_dates(dates);
    if entry.occupation_job_title.is_empty() {
        if let Some(title) = title {
            entry.occupation_job_title = title;
        }
    }
}

/// Compiled work-experience scanner.
#[derive(Debug, Clone)]
pub struct WorkExperienceScanner {
    company_suffixes: TermSet,
    job_titles: TermSet,
}

impl WorkExperienceScanner {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            company_suffixes: TermSet::new(&config.company_suffixes, true),
            job_titles: TermSet::new(&config.job_title_keywords, false),
        }
    }

    /// All work entries in discovery order (untruncated).
    pub fn scan(&self, lines: &[String]) -> Vec<WorkExperienceEntry> {
        let mut closed = Vec::new();
        let state = lines.iter().fold(WorkState::Idle, |state, line| {
            state.step(self.classify(line), &mut closed)
        });
        state.close(&mut closed);
        closed
    }

    /// Assigns a role to one line following the fixed priority order.
    pub fn classify(&self, line: &str) -> LineRole {
        if let Some(anchor) = self.company_anchor(line) {
            return anchor;
        }
        if let Some(dates) = find_date_range(line) {
            let title = title_around(line, &dates);
            return LineRole::DateRange { dates, title };
        }
        if let Some(reason) = REASON_RE.captures(line).and_then(|c| c.name("reason")) {
            return LineRole::ReasonForLeaving(reason.as_str().trim().to_string());
        }
        LineRole::Description(BULLET_PREFIX_RE.replace(line, "").trim().to_string())
    }

    fn company_anchor(&self, line: &str) -> Option<LineRole> {
        if self.company_suffixes.matches(line) {
            let dates = find_date_range(line);
            let rest = match &dates {
                Some(d) => format!("{} {}", &line[..d.start], &line[d.end..]),
                None => line.to_string(),
            };

            let segments: Vec<&str> = rest
                .split('|')
                .map(|s| s.trim_matches(SEPARATORS))
                .filter(|s| !s.is_empty())
                .collect();
            let company_idx = segments
                .iter()
                .position(|s| self.company_suffixes.matches(s))
                .unwrap_or(0);
            let company = segments
                .get(company_idx)
                .map_or_else(|| line.trim().to_string(), |s| s.to_string());
            let others: Vec<&str> = segments
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != company_idx)
                .map(|(_, s)| *s)
                .collect();
            let title = (!others.is_empty()).then(|| others.join(" | "));

            return Some(LineRole::CompanyAnchor {
                company,
                title,
                dates,
            });
        }

        let caps = TITLE_AT_COMPANY_RE.captures(line)?;
        let title = caps.name("title")?.as_str().trim();
        let company = caps.name("company")?.as_str();
        if BULLET_PREFIX_RE.is_match(title) || !self.job_titles.matches(title) {
            return None;
        }

        let dates = find_date_range(company);
        let company = match &dates {
            Some(d) => format!("{} {}", &company[..d.start], &company[d.end..]),
            None => company.to_string(),
        };
        Some(LineRole::CompanyAnchor {
            company: company.trim_matches(SEPARATORS).to_string(),
            title: Some(title.to_string()),
            dates,
        })
    }
}

/// Text next to a date range, used as a job title (`Engineer Jan 2020 - Present`).
fn title_around(line: &str, dates: &DateRange) -> Option<String> {
    let before = line[..dates.start].trim_matches(SEPARATORS);
    let after = line[dates.end..].trim_matches(SEPARATORS);
    [before, after]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn scanner() -> WorkExperienceScanner {
        WorkExperienceScanner::new(&ExtractorConfig::default())
    }

    #[test]
    fn test_company_dates_and_description() {
        let entries = scanner().scan(&lines(&[
            "XYZ PTE LTD",
            "Engineer Jan 2020 - Present",
            "- Built systems",
            "- Led team",
        ]));
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.company, "XYZ PTE LTD");
        assert_eq!(e.occupation_job_title, "Engineer");
        assert_eq!(e.from, "Jan 2020");
        assert_eq!(e.to, "Present");
        assert_eq!(e.description, "Built systems Led team");
    }

    #[test]
    fn test_trailing_entry_is_flushed() {
        let entries = scanner().scan(&lines(&[
            "ALPHA SDN BHD",
            "2018 - 2019",
            "Handled accounts",
            "BETA PTE LTD",
            "Mar 2019 - Present",
            "Still writing this",
        ]));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "ALPHA SDN BHD");
        assert_eq!(entries[0].description, "Handled accounts");
        assert_eq!(entries[1].company, "BETA PTE LTD");
        assert_eq!(entries[1].description, "Still writing this");
    }

    #[test]
    fn test_date_line_without_company_opens_blank_entry() {
        let entries = scanner().scan(&lines(&["Jun 2015 - Dec 2016", "Did things"]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "");
        assert_eq!(entries[0].from, "Jun 2015");
        assert_eq!(entries[0].description, "Did things");
    }

    #[test]
    fn test_idle_descriptions_and_reasons_are_dropped() {
        let entries = scanner().scan(&lines(&[
            "Jane Doe",
            "Reason for leaving: relocation",
            "Objective: grow",
        ]));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_reason_for_leaving() {
        let entries = scanner().scan(&lines(&[
            "OMEGA HOLDINGS",
            "Reason for Leaving: Career advancement",
            "• Managed vendors",
        ]));
        assert_eq!(entries[0].reason_for_leaving, "Career advancement");
        assert_eq!(entries[0].description, "Managed vendors");
    }

    #[test]
    fn test_priority_company_beats_date() {
        let line = "ACME PTE LTD | Software Engineer | Jan 2019 - Dec 2020";
        assert_eq!(
            scanner().classify(line),
            LineRole::CompanyAnchor {
                company: "ACME PTE LTD".to_string(),
                title: Some("Software Engineer".to_string()),
                dates: find_date_range(line),
            }
        );
    }

    #[test]
    fn test_priority_date_beats_reason() {
        let role = scanner().classify("Reason for leaving: contract 2019 - 2020");
        assert!(matches!(role, LineRole::DateRange { .. }));
    }

    #[test]
    fn test_priority_reason_beats_description() {
        assert_eq!(
            scanner().classify("Reasons for leaving - company closed"),
            LineRole::ReasonForLeaving("company closed".to_string())
        );
        assert_eq!(
            scanner().classify("* Shipped the app"),
            LineRole::Description("Shipped the app".to_string())
        );
    }

    #[test]
    fn test_title_at_company_anchor() {
        let entries = scanner().scan(&lines(&[
            "Senior Software Engineer at Shopee",
            "2021 - Present",
            "Presented at Google I/O",
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Shopee");
        assert_eq!(entries[0].occupation_job_title, "Senior Software Engineer");
        assert_eq!(entries[0].from, "2021");
        assert_eq!(entries[0].description, "Presented at Google I/O");
    }

    #[test]
    fn test_prose_with_at_is_not_an_anchor() {
        assert!(matches!(
            scanner().classify("Worked at the front desk"),
            LineRole::Description(_)
        ));
        assert!(matches!(
            scanner().classify("- Engineer at Grab"),
            LineRole::Description(_)
        ));
    }

    #[test]
    fn test_lowercase_group_is_not_a_company() {
        assert!(matches!(
            scanner().classify("Led a focus group of 12"),
            LineRole::Description(_)
        ));
    }

    #[test]
    fn test_company_anchor_closes_previous_entry() {
        let mut closed = Vec::new();
        let state = WorkState::Open(WorkExperienceEntry::for_company("OLD LTD", None));
        let state = state.step(
            LineRole::CompanyAnchor {
                company: "NEW LTD".to_string(),
                title: None,
                dates: None,
            },
            &mut closed,
        );
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].company, "OLD LTD");
        assert!(matches!(state, WorkState::Open(ref e) if e.company == "NEW LTD"));
    }

    #[test]
    fn test_date_line_keeps_existing_title() {
        let entries = scanner().scan(&lines(&[
            "Analyst at DBS Bank",
            "Associate Jan 2017 - Feb 2018",
        ]));
        assert_eq!(entries[0].occupation_job_title, "Analyst");
        assert_eq!(entries[0].to, "Feb 2018");
    }

    #[test]
    fn test_empty_input() {
        assert!(scanner().scan(&[]).is_empty());
    }
}
