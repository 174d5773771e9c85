//! Result assembler: the single entry point of the extraction engine.

use thiserror::Error;
use tracing::debug;

use crate::extraction::education::EducationScanner;
use crate::extraction::experience::WorkExperienceScanner;
use crate::extraction::models::ExtractionResult;
use crate::extraction::name::detect_name;
use crate::extraction::normalize::normalize;
use crate::extraction::scalar::ScalarExtractor;
use crate::extraction::vocabulary::ExtractorConfig;

/// Raised only while compiling an `ExtractorConfig`; extraction itself never fails.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Invalid field label pattern: {0}")]
    LabelPattern(#[from] regex::Error),
}

/// Compiled extraction engine. Immutable after construction and safe to share
/// across threads; each `extract` call owns all of its intermediate state.
#[derive(Debug, Clone)]
pub struct ResumeExtractor {
    bullet_glyphs: Vec<char>,
    max_entries: usize,
    scalars: ScalarExtractor,
    education: EducationScanner,
    experience: WorkExperienceScanner,
}

impl ResumeExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        Ok(Self {
            bullet_glyphs: config.bullet_glyphs.clone(),
            max_entries: config.max_entries,
            scalars: ScalarExtractor::new(config)?,
            education: EducationScanner::new(config),
            experience: WorkExperienceScanner::new(config),
        })
    }

    /// Extracts a profile from plain resume text. Any input is accepted;
    /// fields that match nothing are left empty.
    pub fn extract(&self, raw: &str) -> ExtractionResult {
        let doc = normalize(raw, &self.bullet_glyphs);

        let mut profile = self.scalars.extract(&doc);
        profile.name = detect_name(&doc);

        let mut education = self.education.scan(doc.lines());
        education.truncate(self.max_entries);

        let mut work_experience = self.experience.scan(doc.lines());
        work_experience.truncate(self.max_entries);

        debug!(
            lines = doc.lines().len(),
            education = education.len(),
            work_experience = work_experience.len(),
            "Extracted resume profile"
        );

        ExtractionResult {
            profile,
            education,
            work_experience,
        }
    }
}
