//! Roadmap - career roadmap text for the result page
//!
//! The only implementation is `SimulatedRoadmap`, a fixed Markdown template
//! (`templates/roadmap.md.hbs`) rendered with handlebars. No model is called.
//! Output is Markdown, so nothing is HTML-escaped here; the page that shows
//! it escapes.

use handlebars::{no_escape, Handlebars};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ROADMAP_TEMPLATE: &str = "roadmap";

#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("roadmap template is invalid: {0}")]
    Template(String),

    #[error("roadmap rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub stream: String,
    pub mcq_score: u32,
    pub mcq_total: u32,
    /// Free-text strengths as the student typed them
    pub strengths: String,
    pub expected_package_lpa: f64,
    pub target_package_lpa: f64,
    pub months_left: u32,
}

/// Produces roadmap Markdown for a request
pub trait RoadmapGenerator {
    fn generate(&self, request: &RoadmapRequest) -> Result<String, RoadmapError>;
    fn name(&self) -> &'static str;
}

/// Template data. Packages are pre-formatted so `18.0` reads as `18`.
#[derive(Debug, Serialize)]
struct RoadmapView<'a> {
    stream: &'a str,
    target: String,
    expected: String,
    months: u32,
    score: u32,
    total: u32,
    strengths: &'a str,
    core_end: u32,
    niche_start: u32,
    niche_end: u32,
    interview_start: u32,
    search_start: u32,
}

impl<'a> RoadmapView<'a> {
    fn from_request(r: &'a RoadmapRequest) -> Self {
        let months = r.months_left;
        let strengths = match r.strengths.trim() {
            "" => "None explicitly mentioned",
            s => s,
        };

        Self {
            stream: &r.stream,
            target: r.target_package_lpa.to_string(),
            expected: r.expected_package_lpa.to_string(),
            months,
            score: r.mcq_score,
            total: r.mcq_total,
            strengths,
            core_end: months.min(4),
            niche_start: months.min(5),
            niche_end: months.min(10),
            interview_start: months.saturating_sub(3).max(1),
            search_start: months.saturating_sub(2).max(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedRoadmap {
    registry: Handlebars<'static>,
}

impl SimulatedRoadmap {
    pub fn new() -> Result<Self, RoadmapError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry
            .register_template_string(ROADMAP_TEMPLATE, include_str!("../../templates/roadmap.md.hbs"))
            .map_err(|e| RoadmapError::Template(e.to_string()))?;

        Ok(Self { registry })
    }
}

impl RoadmapGenerator for SimulatedRoadmap {
    fn generate(&self, request: &RoadmapRequest) -> Result<String, RoadmapError> {
        self.registry
            .render(ROADMAP_TEMPLATE, &RoadmapView::from_request(request))
            .map_err(|e| RoadmapError::Render(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
