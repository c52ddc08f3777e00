//! Artifact pair and inference context tests
//!
//! A trivial mean estimator keeps these fast; the forest has its own tests.

use std::fs;

use serde::{Deserialize, Serialize};
use tempfile::tempdir;
use uuid::Uuid;

use super::artifact::{load_artifacts, model_path, save_artifacts, schema_path, ConfigurationError, SchemaArtifact};
use super::estimator::{check_rows, Estimator, EstimatorError};
use super::inference::{InferenceContext, InferenceError};
use crate::logic::features::{
    AlignError, AlignedVector, FeatureAligner, FeatureSchema, RawRecord, RawValue, SchemaBuilder,
};

/// Predicts the training mean plus the first feature
#[derive(Debug, Default, Serialize, Deserialize)]
struct MeanEstimator {
    mean: Option<f64>,
    layout_hash: Option<u32>,
    feature_count: usize,
}

impl Estimator for MeanEstimator {
    fn fit(&mut self, rows: &[AlignedVector], targets: &[f64]) -> Result<(), EstimatorError> {
        let first = rows.first().ok_or(EstimatorError::EmptyTrainingSet)?;
        check_rows(rows, first.layout_hash, first.len())?;
        self.mean = Some(targets.iter().sum::<f64>() / targets.len() as f64);
        self.layout_hash = Some(first.layout_hash);
        self.feature_count = first.len();
        Ok(())
    }

    fn predict(&self, rows: &[AlignedVector]) -> Result<Vec<f64>, EstimatorError> {
        let (mean, hash) = self.mean.zip(self.layout_hash).ok_or(EstimatorError::NotFitted)?;
        check_rows(rows, hash, self.feature_count)?;
        Ok(rows.iter().map(|r| mean + r.values[0]).collect())
    }

    fn is_fitted(&self) -> bool {
        self.mean.is_some()
    }

    fn layout_hash(&self) -> Option<u32> {
        self.layout_hash
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn name(&self) -> &'static str {
        "mean"
    }
}

fn schema() -> FeatureSchema {
    SchemaBuilder::new()
        .scalars(["cgpa", "tier"])
        .skills(["Python", "Java"])
        .build()
        .unwrap()
}

fn skills() -> Vec<String> {
    vec!["Python".into(), "Java".into()]
}

/// Overwrite model.json through `edit` and re-sign it in schema.json
fn tamper_model(dir: &std::path::Path, edit: impl FnOnce(&mut serde_json::Value)) {
    let mut model: serde_json::Value =
        serde_json::from_slice(&fs::read(model_path(dir)).unwrap()).unwrap();
    edit(&mut model);
    let model_bytes = serde_json::to_vec(&model).unwrap();
    fs::write(model_path(dir), &model_bytes).unwrap();

    let mut artifact: SchemaArtifact =
        serde_json::from_slice(&fs::read(schema_path(dir)).unwrap()).unwrap();
    artifact.model_sha256 = {
        use sha2::{Digest, Sha256};
        hex::encode(Sha256::digest(&model_bytes))
    };
    fs::write(schema_path(dir), serde_json::to_vec(&artifact).unwrap()).unwrap();
}

fn fitted(schema: &FeatureSchema) -> MeanEstimator {
    let records: Vec<RawRecord> = vec![
        [("cgpa", 8.0)].into_iter().collect(),
        [("cgpa", 6.0)].into_iter().collect(),
    ];
    let rows = FeatureAligner::new(schema).align_all(&records).unwrap();

    let mut estimator = MeanEstimator::default();
    estimator.fit(&rows, &[10.0, 20.0]).unwrap();
    estimator
}

#[test]
fn test_save_load_cycle() {
    let dir = tempdir().unwrap();
    let schema = schema();
    let run_id = Uuid::new_v4();

    let written = save_artifacts(dir.path(), run_id, &schema, &skills(), &fitted(&schema)).unwrap();
    assert_eq!(written.feature_names, schema.names());

    let loaded = load_artifacts::<MeanEstimator>(dir.path()).unwrap();
    assert_eq!(loaded.run_id, run_id);
    assert_eq!(loaded.schema, schema);
    assert_eq!(loaded.schema.names(), &["cgpa", "tier", "python", "java"]);
    assert_eq!(loaded.estimator.mean, Some(15.0));
    assert_eq!(loaded.skills, skills());
}

#[test]
fn test_model_layout_hash_must_match_schema() {
    let dir = tempdir().unwrap();
    let schema = schema();
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();

    tamper_model(dir.path(), |model| {
        model["layout_hash"] = serde_json::json!(schema.layout_hash().wrapping_add(1));
    });

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(
        result,
        Err(ConfigurationError::LayoutHashMismatch { model, schema: s })
            if model == schema.layout_hash().wrapping_add(1) && s == schema.layout_hash()
    ));
}

#[test]
fn test_model_feature_count_must_match_schema() {
    let dir = tempdir().unwrap();
    let schema = schema();
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();

    tamper_model(dir.path(), |model| {
        model["feature_count"] = serde_json::json!(schema.len() + 1);
    });

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(
        result,
        Err(ConfigurationError::FeatureCount { model: 5, schema: 4 })
    ));
}

#[test]
fn test_skill_without_column_rejected() {
    let dir = tempdir().unwrap();
    let schema = schema();

    let result = save_artifacts(
        dir.path(),
        Uuid::new_v4(),
        &schema,
        &["Python".to_string(), "Rust".to_string()],
        &fitted(&schema),
    );
    assert!(matches!(
        result,
        Err(ConfigurationError::SkillCatalog { ref skill, ref column }) if skill == "Rust" && column == "rust"
    ));

    // Same check on load when schema.json is edited by hand
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();
    let mut artifact: SchemaArtifact =
        serde_json::from_slice(&fs::read(schema_path(dir.path())).unwrap()).unwrap();
    artifact.skills.push("Go".into());
    fs::write(schema_path(dir.path()), serde_json::to_vec(&artifact).unwrap()).unwrap();

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(result, Err(ConfigurationError::SkillCatalog { .. })));
}

#[test]
fn test_missing_schema_is_configuration_error() {
    let dir = tempdir().unwrap();
    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(result, Err(ConfigurationError::Missing(p)) if p == schema_path(dir.path())));
}

#[test]
fn test_missing_model_is_configuration_error() {
    let dir = tempdir().unwrap();
    let schema = schema();
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();
    fs::remove_file(model_path(dir.path())).unwrap();

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(result, Err(ConfigurationError::Missing(p)) if p == model_path(dir.path())));
}

#[test]
fn test_model_from_other_run_rejected() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let schema = schema();
    save_artifacts(a.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();
    save_artifacts(b.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();

    // Pair schema from run A with model from run B
    fs::copy(model_path(b.path()), model_path(a.path())).unwrap();

    let result = load_artifacts::<MeanEstimator>(a.path());
    assert!(matches!(result, Err(ConfigurationError::Checksum { .. })));

    // Even with a matching checksum the run ids must agree
    let mut artifact: SchemaArtifact =
        serde_json::from_slice(&fs::read(schema_path(a.path())).unwrap()).unwrap();
    let model_bytes = fs::read(model_path(a.path())).unwrap();
    artifact.model_sha256 = {
        use sha2::{Digest, Sha256};
        hex::encode(Sha256::digest(&model_bytes))
    };
    fs::write(schema_path(a.path()), serde_json::to_vec(&artifact).unwrap()).unwrap();

    let result = load_artifacts::<MeanEstimator>(a.path());
    assert!(matches!(result, Err(ConfigurationError::RunMismatch { .. })));
}

#[test]
fn test_reordered_schema_file_rejected() {
    let dir = tempdir().unwrap();
    let schema = schema();
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();

    let mut artifact: SchemaArtifact =
        serde_json::from_slice(&fs::read(schema_path(dir.path())).unwrap()).unwrap();
    artifact.feature_names.swap(2, 3);
    fs::write(schema_path(dir.path()), serde_json::to_vec(&artifact).unwrap()).unwrap();

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(result, Err(ConfigurationError::Layout(_))));
}

#[test]
fn test_empty_schema_file_rejected() {
    let dir = tempdir().unwrap();
    let schema = schema();
    save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&schema)).unwrap();

    let mut artifact: SchemaArtifact =
        serde_json::from_slice(&fs::read(schema_path(dir.path())).unwrap()).unwrap();
    artifact.feature_names.clear();
    fs::write(schema_path(dir.path()), serde_json::to_vec(&artifact).unwrap()).unwrap();

    let result = load_artifacts::<MeanEstimator>(dir.path());
    assert!(matches!(result, Err(ConfigurationError::Schema(_))));
}

#[test]
fn test_save_refuses_unfitted_or_foreign_estimator() {
    let dir = tempdir().unwrap();
    let schema = schema();

    let result = save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &MeanEstimator::default());
    assert!(matches!(result, Err(ConfigurationError::NotFitted)));

    let other = SchemaBuilder::new().scalar("cgpa").build().unwrap();
    let result = save_artifacts(dir.path(), Uuid::new_v4(), &schema, &skills(), &fitted(&other));
    assert!(matches!(result, Err(ConfigurationError::LayoutHashMismatch { .. })));
}

#[test]
fn test_context_predicts_through_alignment() {
    let dir = tempdir().unwrap();
    let schema = schema();
    let run_id = Uuid::new_v4();
    save_artifacts(dir.path(), run_id, &schema, &skills(), &fitted(&schema)).unwrap();

    let ctx = InferenceContext::<MeanEstimator>::load(dir.path()).unwrap();
    assert_eq!(ctx.run_id(), run_id);

    let raw: RawRecord = [
        ("cgpa", RawValue::from(2.0)),
        ("python", RawValue::from(true)),
        ("Rust", RawValue::from(true)),
    ]
    .into_iter()
    .collect();

    let result = ctx.predict(&raw).unwrap();
    assert_eq!(result.package_lpa, 17.0);
    assert_eq!(result.ignored_keys, vec!["Rust".to_string()]);
    assert_eq!(result.layout_hash, schema.layout_hash());
    assert_eq!(result.method, "mean");

    let metadata = ctx.metadata();
    assert_eq!(metadata.layout.feature_count, 4);
    assert_eq!(ctx.skills(), &["Python".to_string(), "Java".to_string()]);
    assert_eq!(metadata.skills, skills());
}

#[test]
fn test_context_rejects_text_values() {
    let schema = schema();
    let ctx = InferenceContext::new(Uuid::new_v4(), chrono::Utc::now(), schema.clone(), fitted(&schema)).unwrap();

    let raw: RawRecord = [("tier", "Tier 1")].into_iter().collect();
    assert!(matches!(
        ctx.predict(&raw),
        Err(InferenceError::Align(AlignError::Coercion { ref name, .. })) if name == "tier"
    ));
}

#[test]
fn test_context_default_fill() {
    let schema = schema();
    let ctx = InferenceContext::new(Uuid::new_v4(), chrono::Utc::now(), schema.clone(), fitted(&schema))
        .unwrap()
        .with_default_fill(1.0);

    // cgpa absent → filled with 1.0
    assert_eq!(ctx.predict(&RawRecord::new()).unwrap().package_lpa, 16.0);
}

#[test]
fn test_context_rejects_foreign_estimator() {
    let other = SchemaBuilder::new().scalar("cgpa").build().unwrap();
    let result = InferenceContext::new(Uuid::new_v4(), chrono::Utc::now(), schema(), fitted(&other));
    assert!(matches!(result, Err(ConfigurationError::LayoutHashMismatch { .. })));

    let result = InferenceContext::new(Uuid::new_v4(), chrono::Utc::now(), schema(), MeanEstimator::default());
    assert!(matches!(result, Err(ConfigurationError::NotFitted)));
}
