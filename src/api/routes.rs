use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::models::{ModelInfo, SummarizeRequest, SummarizeResponse};
use crate::api::response;
use crate::error::AppError;
use crate::model::ChatModel;
use crate::pipeline::{self, Outcome};
use crate::ui;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/models", get(models_handler))
        .route("/api/summarize", post(summarize_handler))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Router served when the completion API credential is missing. It only
/// explains the problem; the summarize form is never offered.
pub fn create_setup_error_router(message: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route("/", get(setup_error_page))
        .route("/health", get(setup_error_health))
        .route("/api/summarize", post(setup_error_summarize))
        .layer(TraceLayer::new_for_http())
        .with_state(message.into())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn index_handler() -> Html<String> {
    Html(ui::render_index())
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn models_handler() -> impl IntoResponse {
    let models: Vec<ModelInfo> = ChatModel::ALL.into_iter().map(ModelInfo::from).collect();
    response::success(models)
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Response {
    let outcome = pipeline::run(
        state.fetcher.as_ref(),
        state.summarizer.as_ref(),
        &req.url,
        req.model,
    )
    .await;

    match outcome {
        Outcome::Summarized(summary) => response::success(SummarizeResponse {
            url: summary.url.to_string(),
            model: summary.model,
            summary: summary.text,
            word_count: summary.article_words,
            summarized_at: Utc::now(),
        })
        .into_response(),
        Outcome::Rejected(err) => err.into_response(),
        Outcome::Failed(err) => {
            response::error::<()>(err.status_code(), format!("Exception: {}", err)).into_response()
        }
    }
}

async fn setup_error_page(State(message): State<Arc<str>>) -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, Html(ui::render_setup_error(&message)))
}

async fn setup_error_health() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unconfigured" })))
}

async fn setup_error_summarize(State(message): State<Arc<str>>) -> Response {
    AppError::ConfigError(message.to_string()).into_response()
}
