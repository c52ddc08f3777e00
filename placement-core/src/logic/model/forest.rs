//! Random forest package estimator (smartcore backend)

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use super::estimator::{check_rows, Estimator, EstimatorError};
use crate::logic::config::TrainingConfig;
use crate::logic::features::AlignedVector;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: u16,
    pub max_depth: Option<u16>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

impl From<&TrainingConfig> for ForestParams {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            n_trees: config.n_trees,
            max_depth: config.max_depth,
            seed: config.seed,
        }
    }
}

impl ForestParams {
    /// Every split considers all features
    fn to_smartcore(self, feature_count: usize) -> RandomForestRegressorParameters {
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees.into())
            .with_m(feature_count)
            .with_seed(self.seed);

        match self.max_depth {
            Some(depth) => params.with_max_depth(depth),
            None => params,
        }
    }
}

/// Random forest over aligned vectors
#[derive(Serialize, Deserialize)]
pub struct PackageForest {
    params: ForestParams,
    layout_hash: Option<u32>,
    feature_count: usize,
    model: Option<Forest>,
}

impl PackageForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            layout_hash: None,
            feature_count: 0,
            model: None,
        }
    }

    pub fn params(&self) -> ForestParams {
        self.params
    }
}

impl std::fmt::Debug for PackageForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageForest")
            .field("params", &self.params)
            .field("layout_hash", &self.layout_hash)
            .field("feature_count", &self.feature_count)
            .field("fitted", &self.model.is_some())
            .finish()
    }
}

fn to_matrix(rows: &[AlignedVector]) -> DenseMatrix<f64> {
    let data: Vec<Vec<f64>> = rows.iter().map(|r| r.values.clone()).collect();
    DenseMatrix::from_2d_vec(&data)
}

impl Estimator for PackageForest {
    fn fit(&mut self, rows: &[AlignedVector], targets: &[f64]) -> Result<(), EstimatorError> {
        let first = rows.first().ok_or(EstimatorError::EmptyTrainingSet)?;
        if rows.len() != targets.len() {
            return Err(EstimatorError::TargetCount {
                rows: rows.len(),
                targets: targets.len(),
            });
        }

        let layout_hash = first.layout_hash;
        let feature_count = first.len();
        check_rows(rows, layout_hash, feature_count)?;

        log::info!(
            "Fitting random forest: {} rows x {} features, {} trees",
            rows.len(),
            feature_count,
            self.params.n_trees
        );

        let x = to_matrix(rows);
        let y = targets.to_vec();
        let model = Forest::fit(&x, &y, self.params.to_smartcore(feature_count))
            .map_err(|e| EstimatorError::Backend(e.to_string()))?;

        self.model = Some(model);
        self.layout_hash = Some(layout_hash);
        self.feature_count = feature_count;
        Ok(())
    }

    fn predict(&self, rows: &[AlignedVector]) -> Result<Vec<f64>, EstimatorError> {
        let (model, layout_hash) = match (&self.model, self.layout_hash) {
            (Some(model), Some(hash)) => (model, hash),
            _ => return Err(EstimatorError::NotFitted),
        };

        if rows.is_empty() {
            return Ok(Vec::new());
        }
        check_rows(rows, layout_hash, self.feature_count)?;

        model
            .predict(&to_matrix(rows))
            .map_err(|e| EstimatorError::Backend(e.to_string()))
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn layout_hash(&self) -> Option<u32> {
        self.layout_hash
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn name(&self) -> &'static str {
        "random_forest"
    }
}
