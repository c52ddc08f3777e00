//! Inference Context - read-only serving state
//!
//! Built once at process start from a validated artifact pair and handed to
//! whoever serves predictions. Nothing in it is mutated after construction,
//! so it can be shared behind an `Arc` without locks.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::artifact::{load_artifacts, ConfigurationError};
use super::estimator::{Estimator, EstimatorError};
use super::forest::PackageForest;
use crate::logic::features::{
    unknown_keys, AlignError, FeatureAligner, FeatureSchema, LayoutInfo, RawRecord, DEFAULT_FILL,
};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted package in LPA, rounded to 2 decimals
    pub package_lpa: f64,
    pub run_id: Uuid,
    pub layout_hash: u32,
    /// Attributes in the input that the schema does not know
    pub ignored_keys: Vec<String>,
    pub inference_time_us: u64,
    pub method: String,
}

/// Model metadata for status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub method: String,
    pub layout: LayoutInfo,
    /// Skill display names the form may offer
    pub skills: Vec<String>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),
}

// ============================================================================
// CONTEXT
// ============================================================================

pub struct InferenceContext<E = PackageForest> {
    run_id: Uuid,
    trained_at: DateTime<Utc>,
    schema: FeatureSchema,
    skills: Vec<String>,
    estimator: E,
    default_fill: f64,
}

impl<E: Estimator> InferenceContext<E> {
    /// Assemble a context from parts, refusing an estimator fit on another layout
    pub fn new(
        run_id: Uuid,
        trained_at: DateTime<Utc>,
        schema: FeatureSchema,
        estimator: E,
    ) -> Result<Self, ConfigurationError> {
        if !estimator.is_fitted() {
            return Err(ConfigurationError::NotFitted);
        }
        match estimator.layout_hash() {
            Some(hash) if hash == schema.layout_hash() => {}
            other => {
                return Err(ConfigurationError::LayoutHashMismatch {
                    model: other.unwrap_or_default(),
                    schema: schema.layout_hash(),
                })
            }
        }

        Ok(Self {
            run_id,
            trained_at,
            schema,
            skills: Vec::new(),
            estimator,
            default_fill: DEFAULT_FILL,
        })
    }

    /// Load a validated artifact pair from `dir`
    pub fn load(dir: &Path) -> Result<Self, ConfigurationError>
    where
        E: DeserializeOwned,
    {
        let loaded = load_artifacts::<E>(dir)?;
        Ok(Self::new(loaded.run_id, loaded.trained_at, loaded.schema, loaded.estimator)?
            .with_skills(loaded.skills))
    }

    /// Skill display names recorded with the schema
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_default_fill(mut self, default_fill: f64) -> Self {
        self.default_fill = default_fill;
        self
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            run_id: self.run_id,
            trained_at: self.trained_at,
            method: self.estimator.name().to_string(),
            layout: self.schema.info(),
            skills: self.skills.clone(),
        }
    }

    fn aligner(&self) -> FeatureAligner<'_> {
        FeatureAligner::new(&self.schema).with_default(self.default_fill)
    }

    /// Align one raw record and predict its package
    pub fn predict(&self, raw: &RawRecord) -> Result<PredictionResult, InferenceError> {
        let start_time = Instant::now();

        let vector = self.aligner().align(raw)?;
        let prediction = self
            .estimator
            .predict(std::slice::from_ref(&vector))?
            .first()
            .copied()
            .ok_or_else(|| EstimatorError::Backend("estimator returned no prediction".into()))?;

        let inference_time = start_time.elapsed().as_micros() as u64;

        Ok(PredictionResult {
            package_lpa: (prediction * 100.0).round() / 100.0,
            run_id: self.run_id,
            layout_hash: vector.layout_hash,
            ignored_keys: unknown_keys(raw, &self.schema)
                .into_iter()
                .map(String::from)
                .collect(),
            inference_time_us: inference_time,
            method: self.estimator.name().to_string(),
        })
    }
}
