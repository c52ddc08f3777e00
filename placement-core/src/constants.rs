//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.

use std::path::PathBuf;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Placement Predictor";

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "placement-predictor";

/// Schema artifact file name
pub const SCHEMA_FILE: &str = "schema.json";

/// Estimator artifact file name
pub const MODEL_FILE: &str = "model.json";

/// Skills the default training run knows about, in column order
pub const COMMON_SKILLS: &[&str] = &[
    "Python", "Java", "C++", "DSA", "Algorithms", "Web Development", "Frontend", "Backend",
    "Machine Learning", "AI", "Cloud Computing", "AWS", "SQL", "Database Management",
    "Operating Systems", "Computer Networks", "Cybersecurity", "DevOps", "Competitive Programming",
];

/// Engineering streams offered by the form (only CSE has an assessment)
pub const STREAMS: &[&str] = &["Computer Science Engineering (CSE)"];

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Default artifact directory: `<data_local_dir>/placement-predictor/artifacts`
pub fn default_artifact_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("artifacts")
}

/// Get artifact directory from environment or use default
pub fn get_artifact_dir() -> PathBuf {
    std::env::var("ARTIFACT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_artifact_dir())
}
