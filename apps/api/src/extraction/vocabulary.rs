//! Extractor configuration — every keyword set, field label and window constant
//! the engine uses, plus the whole-term matcher built from them.
//!
//! Defaults are tuned for Singapore/Malaysia style resumes. A deployment can
//! override any subset through a JSON file (see `Config::extractor_config_path`);
//! missing keys fall back to the defaults below.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Labels that introduce a `Label: value` field, grouped by target field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLabels {
    pub date_of_birth: Vec<String>,
    pub gender: Vec<String>,
    pub language: Vec<String>,
    pub nationality: Vec<String>,
    pub notice_period: Vec<String>,
    pub race: Vec<String>,
    pub skills: Vec<String>,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            date_of_birth: strings(&[
                "Date of Birth",
                "DOB",
                "D.O.B",
                "D.O.B.",
                "Birth Date",
            ]),
            gender: strings(&["Gender", "Sex"]),
            language: strings(&[
                "Languages",
                "Language",
                "Spoken Languages",
                "Languages Spoken",
                "Language Proficiency",
            ]),
            nationality: strings(&["Nationality", "Citizenship"]),
            notice_period: strings(&["Notice Period", "Availability"]),
            race: strings(&["Race", "Ethnicity"]),
            skills: strings(&[
                "Skills",
                "Technical Skills",
                "Key Skills",
                "Core Skills",
                "Skill Set",
                "Skillset",
                "Programming Languages",
                "Core Competencies",
            ]),
        }
    }
}

/// Everything the extraction engine needs to know about the outside world.
///
/// Passed to `ResumeExtractor::new` once at startup; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Glyphs treated as line separators by the normalizer.
    pub bullet_glyphs: Vec<char>,
    pub labels: FieldLabels,
    /// Terms that mark a line as an education anchor (case-insensitive).
    pub degree_keywords: Vec<String>,
    /// Terms that mark a line as naming an institution (case-insensitive).
    pub institution_keywords: Vec<String>,
    /// Legal-entity suffixes that mark a company line (case-sensitive).
    pub company_suffixes: Vec<String>,
    /// Words that make the left side of `<title> at <company>` a job title.
    pub job_title_keywords: Vec<String>,
    pub skill_keywords: Vec<String>,
    pub language_keywords: Vec<String>,
    pub gender_keywords: Vec<String>,
    /// Lines after an education anchor searched for a date range.
    pub date_lookahead: usize,
    /// Lines before an education anchor searched for an institution.
    pub institute_lookback: usize,
    /// Cap applied to both the education and work-experience lists.
    pub max_entries: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            bullet_glyphs: vec![
                '•', '●', '▪', '■', '◆', '♦', '○', '◦', '►', '▶', '➢', '➤', '✓', '✔', '∙', '‣',
                '⁃', '\u{F0B7}', '\u{F0A7}', '\u{F0D8}',
            ],
            labels: FieldLabels::default(),
            degree_keywords: strings(&[
                "Bachelor",
                "Bachelors",
                "Master",
                "Masters",
                "Diploma",
                "Graduate Diploma",
                "Degree",
                "Associate Degree",
                "Certificate",
                "PhD",
                "Ph.D",
                "Doctorate",
                "MBA",
                "BSc",
                "B.Sc",
                "MSc",
                "M.Sc",
                "B.Tech",
                "M.Tech",
                "B.Eng",
                "M.Eng",
                "B.A",
                "GCE",
                "A Level",
                "O Level",
                "Nitec",
                "Higher Nitec",
                "Postgraduate",
            ]),
            institution_keywords: strings(&[
                "University",
                "Universiti",
                "College",
                "Junior College",
                "Institute",
                "Polytechnic",
                "School",
                "Academy",
                "ITE",
            ]),
            company_suffixes: strings(&[
                "PTE LTD",
                "PTE. LTD.",
                "Pte Ltd",
                "Pte. Ltd.",
                "SDN BHD",
                "SDN. BHD.",
                "Sdn Bhd",
                "Sdn. Bhd.",
                "BHD",
                "Bhd",
                "LTD",
                "Ltd",
                "Ltd.",
                "Limited",
                "LIMITED",
                "INC",
                "Inc",
                "Inc.",
                "LLC",
                "LLP",
                "PLC",
                "Corp",
                "Corp.",
                "Corporation",
                "GROUP",
                "HOLDINGS",
                "Holdings",
                "GmbH",
            ]),
            job_title_keywords: strings(&[
                "Engineer",
                "Developer",
                "Programmer",
                "Architect",
                "Analyst",
                "Scientist",
                "Consultant",
                "Manager",
                "Director",
                "Executive",
                "Officer",
                "Head",
                "Lead",
                "Supervisor",
                "Coordinator",
                "Administrator",
                "Assistant",
                "Associate",
                "Specialist",
                "Designer",
                "Technician",
                "Accountant",
                "Intern",
                "Trainee",
                "Teacher",
                "Lecturer",
                "Nurse",
                "Clerk",
                "Cashier",
                "Representative",
                "Agent",
                "Operator",
                "Founder",
                "President",
                "Tester",
                "Chef",
                "Driver",
            ]),
            skill_keywords: strings(&[
                "Python",
                "Java",
                "JavaScript",
                "TypeScript",
                "Rust",
                "Golang",
                "C++",
                "C#",
                "PHP",
                "Ruby",
                "Swift",
                "Kotlin",
                "Scala",
                "SQL",
                "MySQL",
                "PostgreSQL",
                "MongoDB",
                "Redis",
                "HTML",
                "CSS",
                "React",
                "Angular",
                "Vue",
                "Node.js",
                "Django",
                "Flask",
                "Spring Boot",
                ".NET",
                "AWS",
                "Azure",
                "GCP",
                "Docker",
                "Kubernetes",
                "Terraform",
                "Git",
                "Linux",
                "Jenkins",
                "Excel",
                "PowerPoint",
                "Tableau",
                "Power BI",
                "SAP",
                "Salesforce",
                "AutoCAD",
                "Photoshop",
                "Machine Learning",
                "Deep Learning",
                "Data Analysis",
                "Project Management",
                "Agile",
                "Scrum",
                "Accounting",
                "Customer Service",
                "Sales",
                "Marketing",
                "Communication",
                "Leadership",
            ]),
            language_keywords: strings(&[
                "English",
                "Mandarin",
                "Chinese",
                "Cantonese",
                "Hokkien",
                "Teochew",
                "Malay",
                "Bahasa Melayu",
                "Bahasa Indonesia",
                "Tamil",
                "Hindi",
                "Bengali",
                "Japanese",
                "Korean",
                "French",
                "German",
                "Spanish",
                "Thai",
                "Vietnamese",
                "Tagalog",
                "Arabic",
            ]),
            gender_keywords: strings(&["Male", "Female", "Other"]),
            date_lookahead: 2,
            institute_lookback: 1,
            max_entries: 3,
        }
    }
}

impl ExtractorConfig {
    /// Reads a JSON override file; keys absent from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read extractor config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid extractor config '{}'", path.display()))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-term matching
// ────────────────────────────────────────────────────────────────────────────

/// A single vocabulary hit inside a line or document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch<'a> {
    pub start: usize,
    pub end: usize,
    /// The matched slice as written in the haystack (original casing).
    pub text: &'a str,
}

/// A keyword set with whole-term matching.
///
/// A hit counts only when the characters on either side are not alphanumeric,
/// so `Java` never hits inside `JavaScript` while `C++` and `Node.js` still work.
/// Case folding is ASCII-only, which keeps byte offsets identical between the
/// folded and the original haystack.
#[derive(Debug, Clone)]
pub struct TermSet {
    /// (term as configured, folded form), longest first.
    terms: Vec<(String, String)>,
    case_sensitive: bool,
}

impl TermSet {
    pub fn new(terms: &[String], case_sensitive: bool) -> Self {
        let mut terms: Vec<(String, String)> = terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                let folded = if case_sensitive {
                    t.to_string()
                } else {
                    t.to_ascii_lowercase()
                };
                (t.to_string(), folded)
            })
            .collect();
        terms.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        terms.dedup_by(|a, b| a.1 == b.1);
        Self {
            terms,
            case_sensitive,
        }
    }

    /// True when any term occurs in `text` as a whole term.
    pub fn matches(&self, text: &str) -> bool {
        self.first(text).is_some()
    }

    /// The earliest hit in `text` (longest term on ties).
    pub fn first<'a>(&self, text: &'a str) -> Option<TermMatch<'a>> {
        self.find_all(text).into_iter().next()
    }

    /// All non-overlapping hits in order of appearance.
    pub fn find_all<'a>(&self, text: &'a str) -> Vec<TermMatch<'a>> {
        let folded;
        let haystack: &str = if self.case_sensitive {
            text
        } else {
            folded = text.to_ascii_lowercase();
            &folded
        };

        let mut hits: Vec<(usize, usize)> = Vec::new();
        for (_, needle) in &self.terms {
            for (start, _) in haystack.match_indices(needle.as_str()) {
                let end = start + needle.len();
                if is_term_boundary(text, start, end) {
                    hits.push((start, end));
                }
            }
        }
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut out = Vec::with_capacity(hits.len());
        let mut last_end = 0;
        for (start, end) in hits {
            if start < last_end {
                continue;
            }
            out.push(TermMatch {
                start,
                end,
                text: &text[start..end],
            });
            last_end = end;
        }
        out
    }

    /// Maps a hit back to the term as configured (canonical casing).
    pub fn canonical(&self, matched: &str) -> Option<&str> {
        let key = if self.case_sensitive {
            matched.to_string()
        } else {
            matched.to_ascii_lowercase()
        };
        self.terms
            .iter()
            .find(|(_, folded)| *folded == key)
            .map(|(term, _)| term.as_str())
    }
}

fn is_term_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
