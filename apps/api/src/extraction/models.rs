//! Output records of the extraction engine.
//!
//! Field names serialize to the exact keys consumers expect
//! (`Date_of_Birth`, `Institute_School`, ...). Every field is a plain `String`
//! that defaults to `""`, so every key is present in every response.

use serde::{Deserialize, Serialize};

use crate::extraction::dates::DateRange;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarProfile {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Mobile")]
    pub mobile: String,
    #[serde(rename = "Date_of_Birth")]
    pub date_of_birth: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "NoticePeriod")]
    pub notice_period: String,
    #[serde(rename = "Race")]
    pub race: String,
    #[serde(rename = "Skills")]
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(rename = "Qualification")]
    pub qualification: String,
    #[serde(rename = "Major_Department")]
    pub major_department: String,
    #[serde(rename = "Institute_School")]
    pub institute_school: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
}

impl EducationEntry {
    /// Builds a complete entry; absent parts become empty strings.
    pub fn new(
        qualification: impl Into<String>,
        major_department: Option<String>,
        institute_school: Option<String>,
        dates: Option<DateRange>,
    ) -> Self {
        let (from, to) = dates.map(|d| (d.from, d.to)).unwrap_or_default();
        Self {
            qualification: qualification.into(),
            major_department: major_department.unwrap_or_default(),
            institute_school: institute_school.unwrap_or_default(),
            from,
            to,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperienceEntry {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Occupation_Job_Title")]
    pub occupation_job_title: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Reason_For_Leaving")]
    pub reason_for_leaving: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl WorkExperienceEntry {
    /// An entry opened by a date line before any company was seen.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn for_company(company: impl Into<String>, title: Option<String>) -> Self {
        Self {
            company: company.into(),
            occupation_job_title: title.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set_dates(&mut self, dates: DateRange) {
        self.from = dates.from;
        self.to = dates.to;
    }

    /// Appends a continuation line, space-joined with what is already there.
    pub fn push_description(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(text);
    }
}

/// The full structured profile returned for one resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub profile: ScalarProfile,
    #[serde(rename = "Education")]
    pub education: Vec<EducationEntry>,
    #[serde(rename = "WorkExperience")]
    pub work_experience: Vec<WorkExperienceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_default_result_serializes_every_key() {
        let json = serde_json::to_value(ExtractionResult::default()).unwrap();
        let obj = json.as_object().unwrap();
        let expected = [
            "Name",
            "Email",
            "Mobile",
            "Date_of_Birth",
            "Gender",
            "Language",
            "Nationality",
            "NoticePeriod",
            "Race",
            "Skills",
            "Education",
            "WorkExperience",
        ];
        assert_eq!(obj.len(), expected.len());
        for key in expected {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["Name"], Value::String(String::new()));
        assert_eq!(obj["Education"], Value::Array(vec![]));
    }

    #[test]
    fn test_entry_keys() {
        let edu = serde_json::to_value(EducationEntry::new("Diploma", None, None, None)).unwrap();
        let keys: Vec<&str> = edu.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["Qualification", "Major_Department", "Institute_School", "From", "To"] {
            assert!(keys.contains(&key));
        }

        let work = serde_json::to_value(WorkExperienceEntry::blank()).unwrap();
        let obj = work.as_object().unwrap();
        for key in [
            "Company",
            "Occupation_Job_Title",
            "From",
            "To",
            "Reason_For_Leaving",
            "Description",
        ] {
            assert_eq!(obj[key], Value::String(String::new()));
        }
    }

    #[test]
    fn test_push_description_space_joins() {
        let mut entry = WorkExperienceEntry::for_company("ACME PTE LTD", None);
        entry.push_description("Built systems");
        entry.push_description("");
        entry.push_description("Led team");
        assert_eq!(entry.description, "Built systems Led team");
    }
}
