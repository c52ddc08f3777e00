//! Model Module - Estimation and Serving
//!
//! - `estimator` - the `Estimator` trait and shared checks
//! - `forest`    - random forest backend
//! - `artifact`  - co-versioned schema + estimator files
//! - `inference` - read-only `InferenceContext`

pub mod estimator;
pub mod forest;
pub mod artifact;
pub mod inference;

#[cfg(test)]
mod tests;

// Re-export common types
pub use artifact::{load_artifacts, load_schema, save_artifacts, ConfigurationError, SchemaArtifact};
pub use estimator::{r2_score, Estimator, EstimatorError};
pub use forest::{ForestParams, PackageForest};
pub use inference::{InferenceContext, InferenceError, ModelMetadata, PredictionResult};
