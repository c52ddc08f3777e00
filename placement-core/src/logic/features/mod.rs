//! Features Module - Schema and Alignment
//!
//! The contract between training and inference lives here:
//! - `layout` - ordered `FeatureSchema`, layout hash, `SchemaBuilder`
//! - `record` - `RawRecord` user input and its builder
//! - `vector` - `align` / `FeatureAligner` producing `AlignedVector`

pub mod layout;
pub mod record;
pub mod vector;


// Re-export common types
pub use layout::{
    FeatureSchema, LayoutInfo, LayoutMismatchError, SchemaBuilder, SchemaError,
    FEATURE_VERSION, SCALAR_FEATURES,
};
pub use record::{RawRecord, RawValue, RecordBuilder};
pub use vector::{align, unknown_keys, AlignError, AlignedVector, FeatureAligner, DEFAULT_FILL};
