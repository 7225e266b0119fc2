//! Disease prediction HTTP server.
//!
//! Wraps a startup-loaded [`Classifier`] and [`ColumnSchema`] in an
//! [`AppContext`] and exposes them through an Axum [`Router`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use diagnose_config::Artifacts;
use diagnose_core::{Classifier, ColumnSchema};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Immutable state shared by all handlers, built once at startup.
pub struct AppContext {
    pub model: Box<dyn Classifier>,
    pub schema: ColumnSchema,
}

impl AppContext {
    pub fn new(model: impl Classifier + 'static, schema: ColumnSchema) -> Self {
        Self {
            model: Box::new(model),
            schema,
        }
    }

    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self::new(artifacts.model, artifacts.schema)
    }
}

/// Builds the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict::predict))
        .route("/symptoms", get(handlers::symptoms::list))
        .fallback(handlers::not_found)
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use diagnose_core::{ModelArtifact, ModelError, TrainedModel};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const FLU_MODEL: &str = r#"{
        "classes": ["Allergy", "Cold", "Flu"],
        "n_features": 3,
        "estimator": {
            "type": "decision_tree",
            "nodes": [
                { "feature": 0, "threshold": 0.5, "left": 1, "right": 4 },
                { "feature": 1, "threshold": 0.5, "left": 2, "right": 3 },
                { "value": [5.0, 0.0, 0.0] },
                { "value": [1.0, 4.0, 0.0] },
                { "value": [0.0, 1.0, 7.0] }
            ]
        }
    }"#;

    fn schema() -> ColumnSchema {
        ColumnSchema::new(vec!["fever".into(), "cough".into(), "fatigue".into()]).unwrap()
    }

    fn app() -> Router {
        let artifact: ModelArtifact = serde_json::from_str(FLU_MODEL).unwrap();
        let model = TrainedModel::from_artifact(artifact).unwrap();
        router(Arc::new(AppContext::new(model, schema())))
    }

    struct BrokenModel;

    impl Classifier for BrokenModel {
        fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError> {
            Err(ModelError::InvalidArtifact("weights corrupted in memory".into()))
        }

        fn n_features(&self) -> usize {
            3
        }

        fn classes(&self) -> &[String] {
            &[]
        }
    }

    struct SilentModel;

    impl Classifier for SilentModel {
        fn predict(&self, _rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError> {
            Ok(vec![])
        }

        fn n_features(&self) -> usize {
            3
        }

        fn classes(&self) -> &[String] {
            &[]
        }
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::post("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, body) = send(app, req).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_index_is_fixed() {
        let app = app();
        for _ in 0..2 {
            let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "Welcome to the Disease Prediction App!");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_predict_happy_path() {
        let (status, body) = send_json(&app(), post_json(r#"{"symptoms": [1, 0, 1]}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "disease": "Flu" }));
    }

    #[tokio::test]
    async fn test_predict_accepts_boolean_flags() {
        let (status, body) = send_json(&app(), post_json(r#"{"symptoms": [false, true, false]}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "disease": "Cold" }));
    }

    #[tokio::test]
    async fn test_predict_missing_key() {
        let (status, body) = send_json(&app(), post_json("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("symptoms"));
    }

    #[tokio::test]
    async fn test_predict_wrong_value_type() {
        let (status, body) = send_json(&app(), post_json(r#"{"symptoms": ["fever", 0, 1]}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_predict_malformed_json() {
        let (status, body) = send_json(&app(), post_json(r#"{"symptoms": [1, 0"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_predict_without_content_type() {
        let req = Request::post("/predict")
            .body(Body::from(r#"{"symptoms": [1, 0, 1]}"#))
            .unwrap();
        let (status, _) = send_json(&app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_wrong_length() {
        let app = app();
        for body in [r#"{"symptoms": [1]}"#, r#"{"symptoms": [1, 0, 1, 1]}"#, r#"{"symptoms": []}"#] {
            let (status, json) = send_json(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(json["error"].as_str().unwrap().starts_with("schema mismatch: expected 3 symptoms"));
        }
    }

    #[tokio::test]
    async fn test_predict_is_stateless() {
        let app = app();
        let happy = r#"{"symptoms": [1, 0, 1]}"#;

        let first = send_json(&app, post_json(happy)).await;
        let _ = send_json(&app, post_json("{}")).await;
        let _ = send_json(&app, post_json(r#"{"symptoms": [1]}"#)).await;
        let second = send_json(&app, post_json(happy)).await;

        assert_eq!(first, second);
        assert_eq!(first.1, json!({ "disease": "Flu" }));
    }

    #[tokio::test]
    async fn test_predict_model_fault_is_internal() {
        let app = router(Arc::new(AppContext::new(BrokenModel, schema())));
        let (status, body) = send_json(&app, post_json(r#"{"symptoms": [1, 0, 1]}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "prediction failed" }));
    }

    #[tokio::test]
    async fn test_predict_empty_model_output_is_internal() {
        let app = router(Arc::new(AppContext::new(SilentModel, schema())));
        let (status, _) = send_json(&app, post_json(r#"{"symptoms": [1, 0, 1]}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_symptoms_lists_schema() {
        let (status, body) = send_json(&app(), Request::get("/symptoms").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "symptoms": ["fever", "cough", "fatigue"] }));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = send_json(&app(), Request::get("/nope").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "not found" }));
    }
}
