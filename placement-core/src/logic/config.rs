//! Training Configuration
//!
//! Ranges and knobs for synthetic data generation and model fitting.
//! Can be loaded from a JSON file; missing fields fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::COMMON_SKILLS;
use crate::logic::dataset::CollegeTier;

#[derive(Debug, Error)]
pub enum TrainingConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid training config: {0}")]
    Invalid(String),
}

// ============================================================================
// TRAINING CONFIG
// ============================================================================

/// Training configuration (can be loaded from config file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of synthetic student profiles
    pub num_samples: usize,
    /// Skill display names, in schema column order
    pub skills: Vec<String>,
    /// Sampling weight per tier, in `CollegeTier::ALL` order
    pub tier_weights: [f64; 3],
    pub min_cgpa: f64,
    pub max_cgpa: f64,
    pub min_mcq_score: u32,
    pub max_mcq_score: u32,
    /// Base package range in LPA
    pub base_package_range: (f64, f64),
    /// Added on top of the base range maximum when clamping
    pub package_headroom: f64,
    /// Std-dev of the gaussian noise added to each package
    pub noise_std: f64,
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_samples: 1000,
            skills: COMMON_SKILLS.iter().map(|s| s.to_string()).collect(),
            tier_weights: [0.3, 0.4, 0.3],
            min_cgpa: 6.0,
            max_cgpa: 10.0,
            min_mcq_score: 0,
            max_mcq_score: 20, // 10 domain + 10 coding/DSA
            base_package_range: (4.0, 25.0),
            package_headroom: 10.0,
            noise_std: 0.5,
            n_trees: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    /// Load config from a JSON file and validate it
    pub fn from_file(path: &Path) -> Result<Self, TrainingConfigError> {
        let data = fs::read(path)?;
        let config: Self = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Small, fast config for tests and smoke runs
    pub fn quick() -> Self {
        Self {
            num_samples: 200,
            n_trees: 10,
            max_depth: Some(8),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        if self.num_samples == 0 {
            return Err(TrainingConfigError::Invalid("num_samples must be > 0".into()));
        }
        if !(self.min_cgpa < self.max_cgpa) {
            return Err(TrainingConfigError::Invalid(format!(
                "cgpa range [{}, {}] is empty", self.min_cgpa, self.max_cgpa
            )));
        }
        if self.min_mcq_score > self.max_mcq_score || self.max_mcq_score == 0 {
            return Err(TrainingConfigError::Invalid(format!(
                "mcq range [{}, {}] is invalid", self.min_mcq_score, self.max_mcq_score
            )));
        }
        let (lo, hi) = self.base_package_range;
        if !(lo < hi) {
            return Err(TrainingConfigError::Invalid(format!("package range [{}, {}] is empty", lo, hi)));
        }
        if self.tier_weights.iter().any(|w| *w < 0.0) || self.tier_weights.iter().sum::<f64>() <= 0.0 {
            return Err(TrainingConfigError::Invalid("tier weights must be non-negative with a positive sum".into()));
        }
        if self.noise_std < 0.0 {
            return Err(TrainingConfigError::Invalid("noise_std must be >= 0".into()));
        }
        if self.n_trees == 0 {
            return Err(TrainingConfigError::Invalid("n_trees must be > 0".into()));
        }
        Ok(())
    }

    /// Tier labels paired with their sampling weight
    pub fn tiers(&self) -> impl Iterator<Item = (CollegeTier, f64)> + '_ {
        CollegeTier::ALL.iter().copied().zip(self.tier_weights.iter().copied())
    }
}

// ============================================================================
// TESTS
// ============================================================================
