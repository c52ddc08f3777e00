//! Artifact Pair - co-versioned schema + estimator on disk
//!
//! A training run writes two files into one directory:
//! - `model.json`  - the fitted estimator, tagged with run id and layout hash
//! - `schema.json` - the feature schema, the skill display names behind its
//!   skill columns, the same run id, and the SHA-256 of `model.json`
//!
//! The schema is written last. Loading refuses any pair that did not come
//! out of the same run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use super::estimator::Estimator;
use crate::constants::{MODEL_FILE, SCHEMA_FILE};
use crate::logic::features::layout::skill_column_name;
use crate::logic::features::{FeatureSchema, LayoutMismatchError, SchemaError};

// ============================================================================
// ERRORS
// ============================================================================

/// Fatal artifact problems. Never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("artifact not found: {0}")]
    Missing(PathBuf),

    #[error("schema artifact is invalid: {0}")]
    Schema(#[from] SchemaError),

    #[error("schema artifact is inconsistent: {0}")]
    Layout(#[from] LayoutMismatchError),

    #[error("model and schema come from different training runs (model {model}, schema {schema})")]
    RunMismatch { model: Uuid, schema: Uuid },

    #[error("model was fit on layout {model:08x}, schema has layout {schema:08x}")]
    LayoutHashMismatch { model: u32, schema: u32 },

    #[error("model expects {model} features, schema has {schema}")]
    FeatureCount { model: usize, schema: usize },

    #[error("skill {skill:?} has no column {column:?} in the schema")]
    SkillCatalog { skill: String, column: String },

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    Checksum { expected: String, actual: String },

    #[error("model artifact holds an unfitted estimator")]
    NotFitted,

    #[error("artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// ON-DISK TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaArtifact {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub version: u8,
    pub layout_hash: u32,
    pub feature_names: Vec<String>,
    /// Skill display names in catalog order, each backed by a column
    pub skills: Vec<String>,
    /// Hex SHA-256 of the model file
    pub model_sha256: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact<E> {
    pub run_id: Uuid,
    pub layout_hash: u32,
    pub feature_count: usize,
    pub estimator: E,
}

/// A validated pair, ready for serving
#[derive(Debug)]
pub struct LoadedArtifacts<E> {
    pub run_id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub schema: FeatureSchema,
    pub skills: Vec<String>,
    pub estimator: E,
}

pub fn schema_path(dir: &Path) -> PathBuf {
    dir.join(SCHEMA_FILE)
}

pub fn model_path(dir: &Path) -> PathBuf {
    dir.join(MODEL_FILE)
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Every skill display name must map onto a schema column
fn check_skills(schema: &FeatureSchema, skills: &[String]) -> Result<(), ConfigurationError> {
    for skill in skills {
        let column = skill_column_name(skill);
        if !schema.contains(&column) {
            return Err(ConfigurationError::SkillCatalog {
                skill: skill.clone(),
                column,
            });
        }
    }
    Ok(())
}

// ============================================================================
// SAVE
// ============================================================================

/// Persist schema and estimator together. Returns the schema artifact written.
pub fn save_artifacts<E>(
    dir: &Path,
    run_id: Uuid,
    schema: &FeatureSchema,
    skills: &[String],
    estimator: &E,
) -> Result<SchemaArtifact, ConfigurationError>
where
    E: Estimator + Serialize,
{
    if !estimator.is_fitted() {
        return Err(ConfigurationError::NotFitted);
    }
    let model_hash = estimator.layout_hash().unwrap_or_default();
    if model_hash != schema.layout_hash() {
        return Err(ConfigurationError::LayoutHashMismatch {
            model: model_hash,
            schema: schema.layout_hash(),
        });
    }
    check_skills(schema, skills)?;

    fs::create_dir_all(dir)?;

    let model = ModelArtifact {
        run_id,
        layout_hash: schema.layout_hash(),
        feature_count: schema.len(),
        estimator,
    };
    let model_bytes = serde_json::to_vec(&model)?;
    fs::write(model_path(dir), &model_bytes)?;

    let artifact = SchemaArtifact {
        run_id,
        trained_at: Utc::now(),
        version: schema.version(),
        layout_hash: schema.layout_hash(),
        feature_names: schema.names().to_vec(),
        skills: skills.to_vec(),
        model_sha256: sha256_hex(&model_bytes),
    };
    fs::write(schema_path(dir), serde_json::to_vec_pretty(&artifact)?)?;

    log::info!(
        "Saved artifact pair for run {} to {} ({} features, layout {:08x})",
        run_id,
        dir.display(),
        schema.len(),
        schema.layout_hash()
    );

    Ok(artifact)
}

// ============================================================================
// LOAD
// ============================================================================

/// Load the schema artifact alone and rebuild the schema from it
pub fn load_schema(dir: &Path) -> Result<(SchemaArtifact, FeatureSchema), ConfigurationError> {
    let path = schema_path(dir);
    if !path.exists() {
        return Err(ConfigurationError::Missing(path));
    }

    let artifact: SchemaArtifact = serde_json::from_slice(&fs::read(&path)?)?;
    let schema = FeatureSchema::from_names(artifact.version, artifact.feature_names.clone())?;
    schema.validate_layout(artifact.version, artifact.layout_hash)?;
    check_skills(&schema, &artifact.skills)?;

    Ok((artifact, schema))
}

/// Load and cross-check both artifacts
pub fn load_artifacts<E>(dir: &Path) -> Result<LoadedArtifacts<E>, ConfigurationError>
where
    E: Estimator + DeserializeOwned,
{
    let (schema_artifact, schema) = load_schema(dir)?;

    let path = model_path(dir);
    if !path.exists() {
        return Err(ConfigurationError::Missing(path));
    }
    let model_bytes = fs::read(&path)?;

    let actual = sha256_hex(&model_bytes);
    if actual != schema_artifact.model_sha256 {
        return Err(ConfigurationError::Checksum {
            expected: schema_artifact.model_sha256,
            actual,
        });
    }

    let model: ModelArtifact<E> = serde_json::from_slice(&model_bytes)?;

    if model.run_id != schema_artifact.run_id {
        return Err(ConfigurationError::RunMismatch {
            model: model.run_id,
            schema: schema_artifact.run_id,
        });
    }
    if model.layout_hash != schema.layout_hash() {
        return Err(ConfigurationError::LayoutHashMismatch {
            model: model.layout_hash,
            schema: schema.layout_hash(),
        });
    }
    if model.feature_count != schema.len() {
        return Err(ConfigurationError::FeatureCount {
            model: model.feature_count,
            schema: schema.len(),
        });
    }
    if !model.estimator.is_fitted() {
        return Err(ConfigurationError::NotFitted);
    }
    if let Some(hash) = model.estimator.layout_hash() {
        if hash != schema.layout_hash() {
            return Err(ConfigurationError::LayoutHashMismatch {
                model: hash,
                schema: schema.layout_hash(),
            });
        }
    }

    log::info!(
        "Loaded artifact pair for run {} ({} features, {})",
        schema_artifact.run_id,
        schema.len(),
        model.estimator.name()
    );

    Ok(LoadedArtifacts {
        run_id: schema_artifact.run_id,
        trained_at: schema_artifact.trained_at,
        schema,
        skills: schema_artifact.skills,
        estimator: model.estimator,
    })
}
