//! Estimator seam
//!
//! Anything that can be fit on aligned vectors and predict a package.
//! Estimators remember the layout hash they were fit against and refuse
//! vectors aligned to any other schema.

use thiserror::Error;

use crate::logic::features::AlignedVector;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("estimator is not fitted")]
    NotFitted,

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("got {targets} targets for {rows} rows")]
    TargetCount { rows: usize, targets: usize },

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("vector aligned to layout {actual:08x}, estimator fit on {expected:08x}")]
    LayoutMismatch { expected: u32, actual: u32 },

    #[error("estimator backend failed: {0}")]
    Backend(String),
}

// ============================================================================
// ESTIMATOR TRAIT
// ============================================================================

/// Trait for regression estimators (random forest, ...)
pub trait Estimator {
    fn fit(&mut self, rows: &[AlignedVector], targets: &[f64]) -> Result<(), EstimatorError>;
    fn predict(&self, rows: &[AlignedVector]) -> Result<Vec<f64>, EstimatorError>;
    fn is_fitted(&self) -> bool;
    /// Layout hash of the schema the estimator was fit against
    fn layout_hash(&self) -> Option<u32>;
    fn feature_count(&self) -> usize;
    fn name(&self) -> &'static str;
}

/// Check a batch against the layout an estimator was fit on
pub(crate) fn check_rows(rows: &[AlignedVector], layout_hash: u32, feature_count: usize) -> Result<(), EstimatorError> {
    for row in rows {
        if row.layout_hash != layout_hash {
            return Err(EstimatorError::LayoutMismatch {
                expected: layout_hash,
                actual: row.layout_hash,
            });
        }
        if row.len() != feature_count {
            return Err(EstimatorError::FeatureCount {
                expected: feature_count,
                actual: row.len(),
            });
        }
    }
    Ok(())
}

/// Coefficient of determination
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = y_true.iter().zip(y_pred).map(|(y, p)| (y - p).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
