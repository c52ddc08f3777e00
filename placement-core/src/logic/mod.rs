//! Logic Module - Training and Serving Engines
//!
//! - `features/`   - schema + alignment contract
//! - `dataset/`    - synthetic student profiles
//! - `model/`      - estimator, artifact pair, inference context
//! - `assessment/` - MCQ bank and scoring
//! - `roadmap`     - simulated roadmap text
//! - `training`    - end-to-end training pipeline

pub mod config;
pub mod features;
pub mod dataset;
pub mod model;
pub mod assessment;
pub mod roadmap;
pub mod training;
