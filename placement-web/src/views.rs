//! HTML rendering
//!
//! Pages are handlebars templates under `templates/`, rendered from
//! serializable view structs. Handlebars HTML-escapes every `{{value}}`.

use handlebars::Handlebars;
use serde::Serialize;

use placement_core::constants::{APP_NAME, STREAMS};
use placement_core::logic::assessment::Section;
use placement_core::logic::dataset::CollegeTier;

use crate::models::{PredictForm, PredictionView};
use crate::AppError;

const FORM: &str = "form";
const RESULT: &str = "result";
const ERROR: &str = "error";

// ============================================================================
// VIEW DATA
// ============================================================================

#[derive(Debug, Serialize)]
struct QuestionView {
    number: usize,
    field: String,
    text: &'static str,
    options: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SectionView {
    title: &'static str,
    questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
struct FormPage {
    app_name: &'static str,
    streams: &'static [&'static str],
    tiers: Vec<&'static str>,
    known_skills: String,
    sections: Vec<SectionView>,
}

#[derive(Debug, Serialize)]
struct ResultPage<'a> {
    package_lpa: String,
    score_total: u32,
    mcq_total: u32,
    domain: u32,
    coding_dsa: u32,
    cgpa: String,
    college_tier: &'static str,
    target: String,
    months_left: u32,
    ignored: String,
    roadmap: &'a str,
}

#[derive(Debug, Serialize)]
struct ErrorPage<'a> {
    message: &'a str,
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        registry.register_template_string(FORM, include_str!("../templates/form.hbs"))?;
        registry.register_template_string(RESULT, include_str!("../templates/result.hbs"))?;
        registry.register_template_string(ERROR, include_str!("../templates/error.hbs"))?;
        Ok(Self { registry })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, AppError> {
        self.registry
            .render(name, data)
            .map_err(|e| AppError::InternalError(format!("rendering {} failed: {}", name, e)))
    }

    /// Input form: student details followed by both MCQ sections
    pub fn render_form<S: AsRef<str>>(&self, known_skills: &[S]) -> Result<String, AppError> {
        let sections = Section::ALL
            .iter()
            .map(|section| SectionView {
                title: section.title(),
                questions: section
                    .questions()
                    .iter()
                    .enumerate()
                    .map(|(i, q)| QuestionView {
                        number: i + 1,
                        field: section.field_name(i),
                        text: q.question,
                        options: q.options,
                    })
                    .collect(),
            })
            .collect();

        let page = FormPage {
            app_name: APP_NAME,
            streams: STREAMS,
            tiers: CollegeTier::ALL.iter().map(|t| t.label()).collect(),
            known_skills: known_skills
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", "),
            sections,
        };
        self.render(FORM, &page)
    }

    pub fn render_result(&self, form: &PredictForm, view: &PredictionView) -> Result<String, AppError> {
        let page = ResultPage {
            package_lpa: format!("{:.2}", view.package_lpa),
            score_total: view.score.total(),
            mcq_total: view.mcq_total,
            domain: view.score.domain,
            coding_dsa: view.score.coding_dsa,
            cgpa: format!("{:.2}", form.cgpa),
            college_tier: form.college_tier.label(),
            target: form.target_package_lpa.to_string(),
            months_left: form.months_left,
            ignored: view.ignored_strengths.join(", "),
            roadmap: &view.roadmap,
        };
        self.render(RESULT, &page)
    }

    pub fn render_error(&self, message: &str) -> Result<String, AppError> {
        self.render(ERROR, &ErrorPage { message })
    }
}
