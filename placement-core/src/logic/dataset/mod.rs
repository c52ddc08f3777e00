//! Dataset Module - Synthetic Training Data
//!
//! Generates seeded student profiles and the package target the estimator
//! learns. Profiles can be exported as JSONL for inspection.

pub mod record;
pub mod generator;
pub mod export;


use thiserror::Error;

pub use generator::{synthesize_package, SyntheticGenerator};
pub use record::{CollegeTier, StudentProfile};

use crate::logic::config::{TrainingConfigError, TrainingConfig};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Config(#[from] TrainingConfigError),

    #[error("invalid sampling distribution: {0}")]
    Distribution(String),
}

/// Generate the full synthetic dataset for a config
pub fn generate(config: &TrainingConfig) -> Result<Vec<StudentProfile>, DatasetError> {
    Ok(SyntheticGenerator::new(config)?.generate())
}
