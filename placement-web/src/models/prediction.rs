//! Prediction form model

use std::collections::HashMap;

use serde::Serialize;
use validator::{Validate, ValidationError};

use placement_core::constants::STREAMS;
use placement_core::logic::assessment::{self, AssessmentScore};
use placement_core::logic::dataset::CollegeTier;
use placement_core::logic::features::{RawRecord, RecordBuilder};

use crate::AppError;

/// Everything the HTML form submits, typed and range-checked.
///
/// Answers stay keyed by form field name (`domain_q_0`, `coding_dsa_q_3`, ...)
/// so the assessment module can score them directly.
#[derive(Debug, Clone, Validate)]
pub struct PredictForm {
    #[validate(custom(function = "validate_stream"))]
    pub stream: String,

    #[validate(range(min = 0.0, max = 10.0, message = "CGPA must be between 0 and 10"))]
    pub cgpa: f64,

    pub college_tier: CollegeTier,

    /// Comma separated, matched exactly against known skill names
    pub strengths: String,

    #[validate(range(min = 3.0, max = 100.0, message = "target package must be between 3 and 100 LPA"))]
    pub target_package_lpa: f64,

    #[validate(range(min = 1, max = 48, message = "months left must be between 1 and 48"))]
    pub months_left: u32,

    pub answers: HashMap<String, String>,
}

impl PredictForm {
    /// Parse raw urlencoded fields. Unrecognized fields are kept as answers.
    pub fn from_fields(mut fields: HashMap<String, String>) -> Result<Self, AppError> {
        let stream = fields.remove("stream").unwrap_or_default();
        let cgpa = parse_finite(&mut fields, "cgpa")?;
        let tier = required_field(&mut fields, "college_tier")?;
        let college_tier = tier
            .parse::<CollegeTier>()
            .map_err(AppError::ValidationError)?;
        let strengths = fields.remove("strengths").unwrap_or_default();
        let target_package_lpa = parse_finite(&mut fields, "target_package_lpa")?;
        let months_left = parse_field(&mut fields, "months_left")?;

        Ok(Self {
            stream,
            cgpa,
            college_tier,
            strengths,
            target_package_lpa,
            months_left,
            answers: fields,
        })
    }

    pub fn score(&self) -> AssessmentScore {
        assessment::score(&self.answers)
    }

    /// Build the raw record the model sees.
    ///
    /// Only the MCQ total becomes a feature. Strengths that match one of
    /// `known_skills` exactly become that skill's column; anything else is
    /// passed through as-is and later reported as ignored.
    pub fn to_record<S: AsRef<str>>(&self, known_skills: &[S]) -> RawRecord {
        RecordBuilder::new()
            .cgpa(self.cgpa)
            .college_tier(self.college_tier)
            .mcq_score(self.score().total())
            .skills_from_text(&self.strengths, known_skills)
            .build()
    }
}

fn validate_stream(stream: &str) -> Result<(), ValidationError> {
    if STREAMS.contains(&stream) {
        return Ok(());
    }
    let mut err = ValidationError::new("stream");
    err.message = Some(format!("unsupported stream: {:?}", stream).into());
    Err(err)
}

fn required_field(fields: &mut HashMap<String, String>, name: &str) -> Result<String, AppError> {
    fields
        .remove(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::ValidationError(format!("{} is required", name)))
}

fn parse_field<T: std::str::FromStr>(
    fields: &mut HashMap<String, String>,
    name: &str,
) -> Result<T, AppError> {
    let raw = required_field(fields, name)?;
    raw.parse()
        .map_err(|_| AppError::ValidationError(format!("{} is not a valid number: {:?}", name, raw)))
}

/// Like `parse_field`, but NaN and infinities are rejected. Range checks
/// never fail on NaN, so this has to happen before validation.
fn parse_finite(fields: &mut HashMap<String, String>, name: &str) -> Result<f64, AppError> {
    let value: f64 = parse_field(fields, name)?;
    if !value.is_finite() {
        return Err(AppError::ValidationError(format!("{} must be a finite number", name)));
    }
    Ok(value)
}

/// Result page data, also handy for logging
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub package_lpa: f64,
    pub score: AssessmentScore,
    pub mcq_total: u32,
    pub ignored_strengths: Vec<String>,
    pub roadmap: String,
}
