//! Router and handlers for the three service endpoints.
//!
//! Handlers bridge to the synchronous pipeline chain with `spawn_blocking`;
//! an `InvalidInput` outcome maps to 400, every other outcome to 200 with
//! the serialized result body (success payload or diagnostic failure, both
//! carrying iterable collections).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::types::{AnalyzeConversationRequest, VerifyPrescriptionRequest};
use crate::config::APP_VERSION;
use crate::pipeline::analyzer::ConversationAnalyzer;
use crate::pipeline::summary::summarize_extraction;
use crate::pipeline::types::Outcome;
use crate::pipeline::verifier::PrescriptionVerifier;
use crate::pipeline::ErrorKind;

/// Shared handles to the two pipelines, constructed once at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<ConversationAnalyzer>,
    pub verifier: Arc<PrescriptionVerifier>,
}

/// Build the service router. CORS is permissive — the original service
/// fronts a browser client on another origin.
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/analyze-conversation", post(analyze_conversation))
        .route("/api/verify-prescription", post(verify_prescription))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn analyze_conversation(
    State(ctx): State<ApiContext>,
    Json(request): Json<AnalyzeConversationRequest>,
) -> Response {
    let analyzer = Arc::clone(&ctx.analyzer);
    let outcome =
        match tokio::task::spawn_blocking(move || analyzer.analyze(&request.conversation)).await {
            Ok(outcome) => outcome,
            Err(e) => return task_failure(&e),
        };

    match &outcome {
        Outcome::Failure(failure) if failure.kind == ErrorKind::InvalidInput => {
            (StatusCode::BAD_REQUEST, Json(&outcome)).into_response()
        }
        _ => {
            // Simple consumers get the projected view; a failed analysis
            // projects the all-defaults extraction.
            let view = summarize_extraction(outcome.payload());
            (StatusCode::OK, Json(view)).into_response()
        }
    }
}

async fn verify_prescription(
    State(ctx): State<ApiContext>,
    Json(request): Json<VerifyPrescriptionRequest>,
) -> Response {
    let verifier = Arc::clone(&ctx.verifier);
    let outcome =
        match tokio::task::spawn_blocking(move || verifier.verify(&request.into())).await {
            Ok(outcome) => outcome,
            Err(e) => return task_failure(&e),
        };

    let status = match outcome.error_kind() {
        Some(ErrorKind::InvalidInput) => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };
    (status, Json(outcome)).into_response()
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    analyzer: &'static str,
    verifier: &'static str,
    version: &'static str,
}

/// `GET /api/health` — clients are constructed at startup, so a serving
/// process is a ready process.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        analyzer: "ready",
        verifier: "ready",
        version: APP_VERSION,
    })
}

fn task_failure(error: &tokio::task::JoinError) -> Response {
    tracing::error!(error = %error, "pipeline task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "internal error"})),
    )
        .into_response()
}
