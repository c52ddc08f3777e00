use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::features::{RawRecord, RecordBuilder};

// ============================================================================
// COLLEGE TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollegeTier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
}

impl CollegeTier {
    pub const ALL: [CollegeTier; 3] = [CollegeTier::Tier1, CollegeTier::Tier2, CollegeTier::Tier3];

    pub fn label(&self) -> &'static str {
        match self {
            CollegeTier::Tier1 => "Tier 1",
            CollegeTier::Tier2 => "Tier 2",
            CollegeTier::Tier3 => "Tier 3",
        }
    }

    /// Feature encoding, higher is better
    pub fn encoded(&self) -> u32 {
        match self {
            CollegeTier::Tier1 => 3,
            CollegeTier::Tier2 => 2,
            CollegeTier::Tier3 => 1,
        }
    }

    /// Package multiplier used by the synthetic data generator
    pub fn package_multiplier(&self) -> f64 {
        match self {
            CollegeTier::Tier1 => 1.5,
            CollegeTier::Tier2 => 1.2,
            CollegeTier::Tier3 => 1.0,
        }
    }
}

impl std::fmt::Display for CollegeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CollegeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollegeTier::ALL
            .iter()
            .copied()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("unknown college tier: {:?}", s))
    }
}

// ============================================================================
// STUDENT PROFILE
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub cgpa: f64,
    pub college_tier: CollegeTier,
    pub mcq_score: u32,
    /// Skill display names the student has
    pub skills: Vec<String>,
    /// Target: package in LPA
    pub package_lpa: f64,
}

impl StudentProfile {
    /// Raw attributes as the serving path would collect them
    pub fn to_record(&self) -> RawRecord {
        self.skills
            .iter()
            .fold(
                RecordBuilder::new()
                    .cgpa(self.cgpa)
                    .college_tier(self.college_tier)
                    .mcq_score(self.mcq_score),
                |builder, skill| builder.skill(skill),
            )
            .build()
    }
}
