//! Aligned Vector - schema-ordered estimator input
//!
//! `align` is the only way raw input reaches an estimator, at training time
//! and at serving time alike. Position `i` of the output always holds the
//! value for `schema.names()[i]`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout::FeatureSchema;
use super::record::{RawRecord, RawValue};

/// Value used for schema attributes absent from a record
pub const DEFAULT_FILL: f64 = 0.0;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    #[error("attribute '{name}' has non-numeric value {value}; expected a number or a boolean flag")]
    Coercion { name: String, value: String },
}

// ============================================================================
// ALIGNED VECTOR
// ============================================================================

/// Schema-ordered feature values plus the layout hash they were aligned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedVector {
    pub layout_hash: u32,
    pub values: Vec<f64>,
}

impl AlignedVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name through the schema it was aligned against
    pub fn get_by_name(&self, schema: &FeatureSchema, name: &str) -> Option<f64> {
        schema.index_of(name).and_then(|i| self.get(i))
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self, schema: &FeatureSchema) -> serde_json::Value {
        serde_json::json!({
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": schema.names().iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.clone(), *value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// ALIGNMENT
// ============================================================================

/// Align `raw` to `schema`, filling absent attributes with `default`.
///
/// Unknown keys are ignored. Matching is by exact name; `"Python"` does not
/// fill a `"python"` column. Fails only when a schema attribute carries a
/// value that is neither numeric nor a flag.
pub fn align(raw: &RawRecord, schema: &FeatureSchema, default: f64) -> Result<AlignedVector, AlignError> {
    let mut values = Vec::with_capacity(schema.len());

    for name in schema.names() {
        let value = match raw.get(name) {
            Some(raw_value) => coerce(name, raw_value)?,
            None => default,
        };
        values.push(value);
    }

    Ok(AlignedVector {
        layout_hash: schema.layout_hash(),
        values,
    })
}

fn coerce(name: &str, value: &RawValue) -> Result<f64, AlignError> {
    value.coerce().ok_or_else(|| AlignError::Coercion {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Keys of `raw` that `schema` does not know, in name order
pub fn unknown_keys<'a>(raw: &'a RawRecord, schema: &FeatureSchema) -> Vec<&'a str> {
    raw.keys().filter(|k| !schema.contains(k)).collect()
}

// ============================================================================
// FEATURE ALIGNER
// ============================================================================

/// Aligner bound to one schema and one fill value
#[derive(Debug, Clone, Copy)]
pub struct FeatureAligner<'a> {
    schema: &'a FeatureSchema,
    default: f64,
}

impl<'a> FeatureAligner<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema, default: DEFAULT_FILL }
    }

    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    pub fn schema(&self) -> &'a FeatureSchema {
        self.schema
    }

    pub fn align(&self, raw: &RawRecord) -> Result<AlignedVector, AlignError> {
        let ignored = unknown_keys(raw, self.schema);
        if !ignored.is_empty() {
            log::debug!("Ignoring {} attribute(s) unknown to schema: {:?}", ignored.len(), ignored);
        }

        align(raw, self.schema, self.default)
    }

    /// Align a batch, stopping at the first coercion error
    pub fn align_all<'r, I>(&self, records: I) -> Result<Vec<AlignedVector>, AlignError>
    where
        I: IntoIterator<Item = &'r RawRecord>,
    {
        records
            .into_iter()
            .map(|raw| align(raw, self.schema, self.default))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
