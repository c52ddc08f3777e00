//! Configuration module

use std::env;
use std::path::PathBuf;

use placement_core::constants;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `schema.json` + `model.json`
    pub artifact_dir: PathBuf,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            artifact_dir: constants::get_artifact_dir(),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
