//! Synthetic student profile generator
//!
//! Seeded, so a config always yields the same dataset.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use super::record::{CollegeTier, StudentProfile};
use super::DatasetError;
use crate::logic::config::TrainingConfig;

const CGPA_WEIGHT: f64 = 0.8;
const MCQ_WEIGHT: f64 = 3.0;
const SKILL_WEIGHT: f64 = 0.5;

pub struct SyntheticGenerator<'a> {
    config: &'a TrainingConfig,
    rng: StdRng,
    tiers: WeightedIndex<f64>,
    noise: Normal<f64>,
}

impl<'a> SyntheticGenerator<'a> {
    pub fn new(config: &'a TrainingConfig) -> Result<Self, DatasetError> {
        config.validate()?;

        let tiers = WeightedIndex::new(config.tier_weights)
            .map_err(|e| DatasetError::Distribution(e.to_string()))?;
        let noise = Normal::new(0.0, config.noise_std)
            .map_err(|e| DatasetError::Distribution(e.to_string()))?;

        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            tiers,
            noise,
        })
    }

    pub fn sample_profile(&mut self) -> StudentProfile {
        let cfg = self.config;

        let cgpa = round_to(self.rng.gen_range(cfg.min_cgpa..cfg.max_cgpa), 1);
        let college_tier = CollegeTier::ALL[self.tiers.sample(&mut self.rng)];
        let mcq_score = self.rng.gen_range(cfg.min_mcq_score..=cfg.max_mcq_score);

        let skills: Vec<String> = cfg
            .skills
            .iter()
            .filter(|_| self.rng.gen_bool(0.5))
            .cloned()
            .collect();

        let (lo, hi) = cfg.base_package_range;
        let base = self.rng.gen_range(lo..hi);
        let noise = self.noise.sample(&mut self.rng);

        let package_lpa = synthesize_package(cfg, cgpa, college_tier, mcq_score, skills.len(), base, noise);

        StudentProfile {
            cgpa,
            college_tier,
            mcq_score,
            skills,
            package_lpa,
        }
    }

    pub fn generate(&mut self) -> Vec<StudentProfile> {
        let profiles: Vec<_> = (0..self.config.num_samples)
            .map(|_| self.sample_profile())
            .collect();

        log::info!(
            "Generated {} synthetic profiles (seed {})",
            profiles.len(),
            self.config.seed
        );
        profiles
    }
}

/// Package formula, given the random base draw and the noise draw
pub fn synthesize_package(
    config: &TrainingConfig,
    cgpa: f64,
    tier: CollegeTier,
    mcq_score: u32,
    skill_count: usize,
    base: f64,
    noise: f64,
) -> f64 {
    let (lo, hi) = config.base_package_range;

    let mut package = base + (cgpa - config.min_cgpa) * CGPA_WEIGHT;
    package *= tier.package_multiplier();
    package += (mcq_score as f64 / config.max_mcq_score as f64) * MCQ_WEIGHT;
    package += skill_count as f64 * SKILL_WEIGHT;
    package += noise;

    round_to(package.clamp(lo, hi + config.package_headroom), 2)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
