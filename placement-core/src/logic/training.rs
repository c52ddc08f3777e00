//! Training Pipeline
//!
//! config → synthetic profiles → schema → aligned rows → forest → artifact pair.
//! Rows go through the same `FeatureAligner` the serving path uses, so the
//! estimator never sees a column order the schema does not describe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::logic::config::{TrainingConfig, TrainingConfigError};
use crate::logic::dataset::{self, DatasetError, StudentProfile};
use crate::logic::features::{AlignError, FeatureAligner, FeatureSchema, RawRecord, SchemaBuilder, SchemaError};
use crate::logic::model::{
    r2_score, save_artifacts, ConfigurationError, Estimator, EstimatorError, ForestParams, PackageForest,
};

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error(transparent)]
    Config(#[from] TrainingConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error(transparent)]
    Artifact(#[from] ConfigurationError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub run_id: Uuid,
    pub samples: usize,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
    /// R² on the training data
    pub r2_train: f64,
    pub artifact_dir: PathBuf,
}

/// Schema for a training config: standard scalars, then the config's skills
pub fn build_schema(config: &TrainingConfig) -> Result<FeatureSchema, SchemaError> {
    SchemaBuilder::with_standard_scalars()
        .skills(&config.skills)
        .build()
}

/// Fit a forest on already generated profiles
pub fn fit_profiles(
    config: &TrainingConfig,
    schema: &FeatureSchema,
    profiles: &[StudentProfile],
) -> Result<(PackageForest, f64), TrainingError> {
    let records: Vec<RawRecord> = profiles.iter().map(StudentProfile::to_record).collect();
    let rows = FeatureAligner::new(schema).align_all(&records)?;
    let targets: Vec<f64> = profiles.iter().map(|p| p.package_lpa).collect();

    let mut forest = PackageForest::new(ForestParams::from(config));
    forest.fit(&rows, &targets)?;

    let predictions = forest.predict(&rows)?;
    let r2 = r2_score(&targets, &predictions);

    Ok((forest, r2))
}

/// Run a full training and write the artifact pair into `out_dir`
pub fn train(config: &TrainingConfig, out_dir: &Path) -> Result<TrainingReport, TrainingError> {
    config.validate()?;

    let profiles = dataset::generate(config)?;
    let schema = build_schema(config)?;
    let (forest, r2_train) = fit_profiles(config, &schema, &profiles)?;

    let run_id = Uuid::new_v4();
    save_artifacts(out_dir, run_id, &schema, &config.skills, &forest)?;

    log::info!(
        "Training run {} complete: {} samples, {} features, R^2 {:.2}",
        run_id,
        profiles.len(),
        schema.len(),
        r2_train
    );

    Ok(TrainingReport {
        run_id,
        samples: profiles.len(),
        feature_count: schema.len(),
        feature_names: schema.names().to_vec(),
        r2_train,
        artifact_dir: out_dir.to_path_buf(),
    })
}
