//! Assessment Module - MCQ scoring
//!
//! Two sections of ten questions each. The total feeds the `mcq_score`
//! feature; the per-section scores are for display only.

pub mod bank;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use bank::{CODING_DSA_MCQS, CSE_DOMAIN_MCQS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McqQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Domain,
    CodingDsa,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Domain, Section::CodingDsa];

    pub fn questions(&self) -> &'static [McqQuestion] {
        match self {
            Section::Domain => CSE_DOMAIN_MCQS,
            Section::CodingDsa => CODING_DSA_MCQS,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Domain => "Domain Specific MCQs (CSE)",
            Section::CodingDsa => "Coding & DSA Basic MCQs",
        }
    }

    /// Form field name for question `index` of this section
    pub fn field_name(&self, index: usize) -> String {
        match self {
            Section::Domain => format!("domain_q_{}", index),
            Section::CodingDsa => format!("coding_dsa_q_{}", index),
        }
    }
}

/// Total number of questions across sections
pub fn total_questions() -> usize {
    Section::ALL.iter().map(|s| s.questions().len()).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentScore {
    pub domain: u32,
    pub coding_dsa: u32,
}

impl AssessmentScore {
    pub fn total(&self) -> u32 {
        self.domain + self.coding_dsa
    }
}

/// Count exact matches of the chosen option for one section.
/// `answers` is keyed by form field name; unanswered questions score zero.
pub fn score_section(section: Section, answers: &HashMap<String, String>) -> u32 {
    section
        .questions()
        .iter()
        .enumerate()
        .filter(|(i, q)| {
            answers
                .get(&section.field_name(*i))
                .is_some_and(|answer| answer == q.correct)
        })
        .count() as u32
}

pub fn score(answers: &HashMap<String, String>) -> AssessmentScore {
    AssessmentScore {
        domain: score_section(Section::Domain, answers),
        coding_dsa: score_section(Section::CodingDsa, answers),
    }
}
