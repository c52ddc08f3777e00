//! Feature Layout - Feature Schema Definition
//!
//! **CRITICAL: the schema controls column order for the estimator**
//!
//! ## Rules (NEVER break these):
//! 1. Scalars first, then skill columns in catalog order
//! 2. No sorting, no renaming of duplicates (duplicates are rejected)
//! 3. Change the scalar set or its order → increment FEATURE_VERSION
//!
//! The schema built at training time is persisted next to the estimator
//! (see `model::artifact`) and reloaded verbatim at serving time.

use std::collections::HashMap;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when the scalar layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// SCALAR FEATURES
// ============================================================================

/// Scalar features, in the exact order they lead every schema
pub const SCALAR_FEATURES: &[&str] = &[
    "cgpa",          // 0: CGPA on a 10 point scale
    "college_tier",  // 1: Tier 1 = 3, Tier 2 = 2, Tier 3 = 1
    "mcq_score",     // 2: Total MCQ score (domain + coding/DSA)
];

/// Column name used for a skill display name.
///
/// `"Web Development"` becomes `"web_development"`.
pub fn skill_column_name(skill: &str) -> String {
    skill.replace(' ', "_").to_lowercase()
}

// ============================================================================
// ERRORS
// ============================================================================

/// Configuration errors raised while building a schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("feature schema is empty: at least one attribute name is required")]
    Empty,

    #[error("duplicate feature name in schema: '{0}'")]
    DuplicateName(String),

    #[error("blank feature name at position {0}")]
    BlankName(usize),
}

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a feature layout
/// Used to detect layout mismatches between artifacts
pub fn compute_layout_hash<S: AsRef<str>>(version: u8, names: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// FEATURE SCHEMA
// ============================================================================

/// Ordered, immutable list of feature names an estimator was fit against.
///
/// Construct through [`SchemaBuilder`] or [`FeatureSchema::from_names`]; both
/// reject empty and duplicate layouts.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    version: u8,
    names: Vec<String>,
    hash: u32,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Rebuild a schema from persisted names, keeping their order verbatim
    pub fn from_names(version: u8, names: Vec<String>) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankName(i));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateName(name.clone()));
            }
        }

        let hash = compute_layout_hash(version, &names);

        Ok(Self { version, names, hash, index })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed schema
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get feature index by exact name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Get feature name by index
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Validate that persisted layout metadata matches this schema
    pub fn validate_layout(&self, version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
        if version != self.version || hash != self.hash {
            return Err(LayoutMismatchError {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: version,
                actual_hash: hash,
            });
        }

        Ok(())
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.hash,
            feature_count: self.len(),
            feature_names: self.names.clone(),
        }
    }
}

impl PartialEq for FeatureSchema {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.names == other.names
    }
}

impl Eq for FeatureSchema {}

// ============================================================================
// SCHEMA BUILDER
// ============================================================================

/// Builds the canonical schema: scalar attributes, then categorical/skill
/// attributes, each group in insertion order.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    version: u8,
    scalars: Vec<String>,
    categorical: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            scalars: Vec::new(),
            categorical: Vec::new(),
        }
    }

    /// Start from the standard scalar features
    pub fn with_standard_scalars() -> Self {
        Self::new().scalars(SCALAR_FEATURES.iter().copied())
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.scalars.push(name.into());
        self
    }

    pub fn scalars<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalars.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn categorical(mut self, name: impl Into<String>) -> Self {
        self.categorical.push(name.into());
        self
    }

    /// Add skill columns from display names (`"Web Development"` → `web_development`)
    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categorical
            .extend(skills.into_iter().map(|s| skill_column_name(s.as_ref())));
        self
    }

    pub fn build(self) -> Result<FeatureSchema, SchemaError> {
        let mut names = self.scalars;
        names.extend(self.categorical);

        let schema = FeatureSchema::from_names(self.version, names)?;
        log::debug!(
            "Built feature schema v{} with {} features (hash: {:08x})",
            schema.version(),
            schema.len(),
            schema.layout_hash()
        );

        Ok(schema)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

// ============================================================================
// TESTS
// ============================================================================
