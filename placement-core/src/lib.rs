//! Placement Predictor Core
//!
//! Feature schema and alignment, synthetic training data, the random forest
//! package estimator, and the read-only inference context used by the web
//! server.

pub mod constants;
pub mod logic;

pub use logic::config::TrainingConfig;
pub use logic::features::{
    align, AlignedVector, FeatureAligner, FeatureSchema, RawRecord, RawValue, RecordBuilder, SchemaBuilder,
};
pub use logic::model::{ConfigurationError, InferenceContext, PredictionResult};
