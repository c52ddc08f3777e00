//! Raw Record - loosely structured user input
//!
//! A `RawRecord` maps attribute names to values exactly as they were
//! collected. It may be any subset of a schema and may carry keys the
//! schema has never heard of. Matching against a schema is exact: no case
//! folding, no trimming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::skill_column_name;
use crate::logic::dataset::CollegeTier;

// ============================================================================
// RAW VALUE
// ============================================================================

/// A single raw attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Presence flag (true = 1, false = 0)
    Flag(bool),
    /// Numeric value, passed through unchanged
    Number(f64),
    /// Text; never coerced
    Text(String),
    /// Null, array or object; never coerced
    Other(serde_json::Value),
}

impl RawValue {
    /// Numeric view of the value, `None` for text
    pub fn coerce(&self) -> Option<f64> {
        match self {
            RawValue::Flag(true) => Some(1.0),
            RawValue::Flag(false) => Some(0.0),
            RawValue::Number(v) => Some(*v),
            RawValue::Text(_) | RawValue::Other(_) => None,
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Flag(b) => write!(f, "{}", b),
            RawValue::Number(v) => write!(f, "{}", v),
            RawValue::Text(s) => write!(f, "{:?}", s),
            RawValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

// ============================================================================
// RAW RECORD
// ============================================================================

/// Attribute name → raw value, ordered by name for stable diagnostics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for a student `RawRecord` with named setters
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self { record: RawRecord::new() }
    }

    pub fn cgpa(mut self, value: f64) -> Self {
        self.record.insert("cgpa", value);
        self
    }

    pub fn college_tier(mut self, tier: CollegeTier) -> Self {
        self.record.insert("college_tier", tier.encoded());
        self
    }

    pub fn mcq_score(mut self, score: u32) -> Self {
        self.record.insert("mcq_score", score);
        self
    }

    /// Mark a skill present by its display name
    pub fn skill(mut self, display_name: &str) -> Self {
        self.record.insert(skill_column_name(display_name), true);
        self
    }

    /// Parse comma-separated free text against a list of known skill display
    /// names. Exact matches become skill flags; anything else is kept under
    /// the text the user typed so alignment can discard it.
    pub fn skills_from_text<S: AsRef<str>>(mut self, text: &str, known_skills: &[S]) -> Self {
        for entry in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match known_skills.iter().find(|k| k.as_ref() == entry) {
                Some(known) => {
                    self.record.insert(skill_column_name(known.as_ref()), true);
                }
                None => {
                    self.record.insert(entry, true);
                }
            }
        }
        self
    }

    /// Set attribute by name dynamically
    pub fn set(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.record.insert(name, value);
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
