use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use placement_core::logic::assessment::Section;
use placement_core::logic::roadmap::SimulatedRoadmap;
use placement_core::logic::training;
use placement_core::{InferenceContext, TrainingConfig};

use crate::config::Config;
use crate::views::Views;
use crate::{create_router, AppState};

fn test_app() -> (tempfile::TempDir, Router) {
    app_trained_with(&TrainingConfig::quick())
}

fn app_trained_with(training_config: &TrainingConfig) -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    training::train(training_config, dir.path()).unwrap();
    let ctx = InferenceContext::load(dir.path()).unwrap();

    let state = AppState {
        ctx: Arc::new(ctx),
        roadmap: Arc::new(SimulatedRoadmap::new().unwrap()),
        views: Arc::new(Views::new().unwrap()),
        config: Config {
            artifact_dir: PathBuf::from(dir.path()),
            port: 0,
            environment: "test".to_string(),
        },
    };
    (dir, create_router(state))
}

fn base_fields(cgpa: &str, strengths: &str) -> Vec<(String, String)> {
    vec![
        ("stream".into(), "Computer Science Engineering (CSE)".into()),
        ("cgpa".into(), cgpa.into()),
        ("college_tier".into(), "Tier 1".into()),
        ("strengths".into(), strengths.into()),
        ("target_package_lpa".into(), "12".into()),
        ("months_left".into(), "10".into()),
    ]
}

fn all_correct_answers() -> Vec<(String, String)> {
    Section::ALL
        .iter()
        .flat_map(|section| {
            section
                .questions()
                .iter()
                .enumerate()
                .map(move |(i, q)| (section.field_name(i), q.correct.to_string()))
        })
        .collect()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn post_form(fields: &[(String, String)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

fn post_json(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "test");
    assert!(json["run_id"].is_string());
}

#[tokio::test]
async fn test_index_renders_form() {
    let (_dir, app) = test_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/predict\""));
    assert!(body.contains("name=\"domain_q_0\""));
    assert!(body.contains("name=\"coding_dsa_q_9\""));
    assert!(body.contains("Web Development"));
}

#[tokio::test]
async fn test_submit_full_marks() {
    let (_dir, app) = test_app();
    let mut fields = base_fields("9.1", "Python, DSA");
    fields.extend(all_correct_answers());

    let (status, body) = send(app, post_form(&fields)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Estimated package"));
    assert!(body.contains("<strong>20/20</strong>"));
    assert!(body.contains("Roadmap"));
    assert!(!body.contains("Not recognized"));
}

#[tokio::test]
async fn test_submit_reports_unknown_strengths() {
    let (_dir, app) = test_app();
    let fields = base_fields("7.0", "Python, Rust, <b>");

    let (status, body) = send(app, post_form(&fields)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>0/20</strong>"));
    assert!(body.contains("Not recognized as skills:"));
    assert!(body.contains("Rust"));
    assert!(body.contains("&lt;b&gt;"));
}

#[tokio::test]
async fn test_submit_out_of_range_cgpa() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, post_form(&base_fields("11", ""))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("CGPA must be between 0 and 10"));
}

#[tokio::test]
async fn test_submit_rejects_nan_numbers() {
    for field in ["cgpa", "target_package_lpa"] {
        let (_dir, app) = test_app();
        let mut fields = base_fields("8", "Python");
        for (k, v) in fields.iter_mut() {
            if k == field {
                *v = "NaN".into();
            }
        }

        let (status, body) = send(app, post_form(&fields)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}=NaN accepted", field);
        assert!(body.contains("must be a finite number"));
        assert!(!body.contains("Estimated package"));
    }
}

#[tokio::test]
async fn test_submit_rejects_unknown_stream() {
    let (_dir, app) = test_app();
    let mut fields = base_fields("8", "");
    fields[0].1 = "Mechanical Engineering".into();

    let (status, body) = send(app, post_form(&fields)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("unsupported stream"));
}

#[tokio::test]
async fn test_custom_skill_catalog_reaches_the_form() {
    let config = TrainingConfig {
        skills: vec!["Rust".into(), "Go".into()],
        ..TrainingConfig::quick()
    };

    let (_dir, app) = app_trained_with(&config);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (_, body) = send(app.clone(), request).await;
    assert!(body.contains("Recognized: Rust, Go"));

    let (status, body) = send(app.clone(), post_form(&base_fields("8", "Rust, Go"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("Not recognized"));

    let request = Request::builder().uri("/api/v1/schema").body(Body::empty()).unwrap();
    let (_, body) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["skills"], serde_json::json!(["Rust", "Go"]));
}

#[tokio::test]
async fn test_submit_missing_tier() {
    let (_dir, app) = test_app();
    let fields: Vec<_> = base_fields("8", "")
        .into_iter()
        .filter(|(k, _)| k != "college_tier")
        .collect();

    let (status, body) = send(app, post_form(&fields)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("college_tier is required"));
}

#[tokio::test]
async fn test_api_predict_ignores_unknown_keys() {
    let (_dir, app) = test_app();
    let body = serde_json::json!({
        "cgpa": 8.0,
        "college_tier": 3,
        "mcq_score": 15,
        "python": true,
        "favourite_colour": "blue"
    });

    let (status, body) = send(app, post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["package_lpa"].as_f64().unwrap() > 0.0);
    assert_eq!(json["ignored_keys"], serde_json::json!(["favourite_colour"]));
}

#[tokio::test]
async fn test_api_predict_rejects_text_for_known_feature() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, post_json(serde_json::json!({ "cgpa": "eight" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_api_predict_ignores_null_under_unknown_key() {
    let (_dir, app) = test_app();
    let body = serde_json::json!({ "cgpa": 8.0, "notes": null, "tags": ["a"] });

    let (status, body) = send(app, post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ignored_keys"], serde_json::json!(["notes", "tags"]));
}

#[tokio::test]
async fn test_api_predict_rejects_null_for_known_feature() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, post_json(serde_json::json!({ "cgpa": null }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("cgpa"));
}

#[tokio::test]
async fn test_api_schema() {
    let (_dir, app) = test_app();
    let request = Request::builder().uri("/api/v1/schema").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let names = json["layout"]["feature_names"].as_array().unwrap();
    assert_eq!(names[0], "cgpa");
    assert_eq!(names[1], "college_tier");
    assert_eq!(names[2], "mcq_score");
    assert_eq!(json["layout"]["feature_count"].as_u64().unwrap() as usize, names.len());
}
