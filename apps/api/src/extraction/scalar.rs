//! Scalar field extractors: contact details, demographic fields, skills and languages.
//!
//! Each field tries a `Label: value` capture first and, where the field has a
//! vocabulary, falls back to scanning the whole document. Nothing here fails:
//! a field that matches nothing is simply `""`.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::models::ScalarProfile;
use crate::extraction::normalize::NormalizedDocument;
use crate::extraction::vocabulary::{ExtractorConfig, FieldLabels, TermSet};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+").expect("valid regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+\s?)?\d(?:[ \-]?\d){7,15}").expect("valid regex"));
static YEAR_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}[ \-](?:19|20)\d{2}$").expect("valid regex"));
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[ \-]\d{1,2}[ \-]\d{2,4}$").expect("valid regex"));

/// Fields that can be introduced by a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabeledField {
    DateOfBirth,
    Gender,
    Language,
    Nationality,
    NoticePeriod,
    Race,
    Skills,
}

// ────────────────────────────────────────────────────────────────────────────
// Labeled fields
// ────────────────────────────────────────────────────────────────────────────

/// Splits lines into `label: value` segments using every configured label at once.
///
/// Labels are tried longest-first so `Programming Languages:` is read as a skills
/// label rather than a language label. A value runs until the next label on the
/// same line, which handles `Nationality: Singaporean Race: Chinese`. A label
/// counts only when it leads the line (after optional punctuation) or follows
/// such a segment, so prose like `improved availability: 99%` is not a field.
#[derive(Debug, Clone)]
pub struct LabelMatcher {
    re: Option<Regex>,
    fields: HashMap<String, LabeledField>,
}

impl LabelMatcher {
    pub fn new(labels: &FieldLabels) -> Result<Self, regex::Error> {
        let groups = [
            (LabeledField::DateOfBirth, &labels.date_of_birth),
            (LabeledField::Gender, &labels.gender),
            (LabeledField::Language, &labels.language),
            (LabeledField::Nationality, &labels.nationality),
            (LabeledField::NoticePeriod, &labels.notice_period),
            (LabeledField::Race, &labels.race),
            (LabeledField::Skills, &labels.skills),
        ];

        let mut fields = HashMap::new();
        let mut alternatives: Vec<String> = Vec::new();
        for (field, list) in groups {
            for label in list.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
                let key = label_key(label);
                if fields.insert(key, field).is_none() {
                    alternatives.push(label.to_string());
                }
            }
        }
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()));

        if alternatives.is_empty() {
            return Ok(Self { re: None, fields });
        }
        let alts: Vec<String> = alternatives
            .iter()
            .map(|l| {
                l.split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .collect();
        let pattern = format!(
            r"(?i)(?:^|[\s|;,])(?P<label>{})(?:\s*:|\s+[-–]\s)",
            alts.join("|")
        );

        Ok(Self {
            re: Some(Regex::new(&pattern)?),
            fields,
        })
    }

    /// First non-empty value per field, in line order.
    pub fn scan(&self, lines: &[String]) -> HashMap<LabeledField, String> {
        let mut found: HashMap<LabeledField, String> = HashMap::new();
        for line in lines {
            for (field, value) in self.segments(line) {
                if !value.is_empty() {
                    found.entry(field).or_insert(value);
                }
            }
        }
        found
    }

    fn segments(&self, line: &str) -> Vec<(LabeledField, String)> {
        let Some(re) = &self.re else {
            return Vec::new();
        };
        let matches: Vec<_> = re.captures_iter(line).collect();
        // Only a line-leading label opens segments; later labels chain off it.
        let leads = matches
            .first()
            .and_then(|caps| caps.get(0))
            .is_some_and(|m| !line[..m.start()].chars().any(char::is_alphanumeric));
        if !leads {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(matches.len());
        for (i, caps) in matches.iter().enumerate() {
            let (Some(whole), Some(label)) = (caps.get(0), caps.name("label")) else {
                continue;
            };
            let Some(&field) = self.fields.get(&label_key(label.as_str())) else {
                continue;
            };
            let value_end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(line.len(), |m| m.start());
            let value = line[whole.end()..value_end]
                .trim()
                .trim_end_matches([',', ';', '|'])
                .trim();
            out.push((field, value.to_string()));
        }
        out
    }
}

fn label_key(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar extractor
// ────────────────────────────────────────────────────────────────────────────

/// Compiled scalar-field extractors. Built once, shared across requests.
#[derive(Debug, Clone)]
pub struct ScalarExtractor {
    labels: LabelMatcher,
    skills: TermSet,
    languages: TermSet,
    genders: TermSet,
}

impl ScalarExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            labels: LabelMatcher::new(&config.labels)?,
            skills: TermSet::new(&config.skill_keywords, false),
            languages: TermSet::new(&config.language_keywords, false),
            genders: TermSet::new(&config.gender_keywords, false),
        })
    }

    /// Every scalar field except `Name`, which the name detector owns.
    pub fn extract(&self, doc: &NormalizedDocument) -> ScalarProfile {
        let mut labeled = self.labels.scan(doc.lines());
        let mut take = |field: LabeledField| labeled.remove(&field).unwrap_or_default();

        let gender_label = take(LabeledField::Gender);
        let skills_label = take(LabeledField::Skills);
        let language_label = take(LabeledField::Language);

        ScalarProfile {
            name: String::new(),
            email: extract_email(doc.text()).unwrap_or_default(),
            mobile: extract_phone(doc.text()).unwrap_or_default(),
            date_of_birth: take(LabeledField::DateOfBirth),
            gender: self.gender(&gender_label, doc.text()),
            language: multi_valued(&language_label, &self.languages, doc.text()),
            nationality: take(LabeledField::Nationality),
            notice_period: take(LabeledField::NoticePeriod),
            race: take(LabeledField::Race),
            skills: multi_valued(&skills_label, &self.skills, doc.text()),
        }
    }

    fn gender(&self, labeled: &str, text: &str) -> String {
        if !labeled.is_empty() {
            return match self.genders.first(labeled) {
                Some(hit) => capitalize(self.genders.canonical(hit.text).unwrap_or(hit.text)),
                None => labeled.to_string(),
            };
        }
        self.genders
            .first(text)
            .map(|hit| capitalize(self.genders.canonical(hit.text).unwrap_or(hit.text)))
            .unwrap_or_default()
    }
}

/// First `local@domain.tld` address in the text.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First 8–16 digit phone number, internal whitespace removed.
///
/// Year pairs (`2015-2019`), numeric dates (`12-05-1990`) and slices of longer
/// digit runs are skipped.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .filter(|m| {
            let before_digit = text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit());
            let after_digit = text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());
            !before_digit && !after_digit
        })
        .map(|m| m.as_str())
        .find(|candidate| {
            !YEAR_PAIR_RE.is_match(candidate) && !NUMERIC_DATE_RE.is_match(candidate)
        })
        .map(|candidate| candidate.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Labeled list if present, else a vocabulary scan; deduplicated and `", "`-joined.
/// A bare slash stays inside an item (`CI/CD`); a spaced one separates items.
fn multi_valued(labeled: &str, vocabulary: &TermSet, text: &str) -> String {
    if !labeled.is_empty() {
        let items = labeled
            .split([',', ';', '|'])
            .flat_map(|item| item.split(" / "))
            .map(str::trim)
            .filter(|s| !s.is_empty());
        return dedup_join(items);
    }
    dedup_join(vocabulary.find_all(text).into_iter().map(|m| m.text))
}

/// Case-insensitive dedup that keeps first-seen casing and order.
fn dedup_join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
