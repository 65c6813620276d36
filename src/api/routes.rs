use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{error, info};

use crate::api::models::ScriptRequest;
use crate::api::response;
use crate::error::AppError;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    response::index()
}

async fn generate_handler(
    State(state): State<AppState>,
    Json(req): Json<ScriptRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        urls = req.urls.len(),
        speakers = req.speakers.len(),
        duration_minutes = req.duration_minutes,
        model = state.pipeline.model().name(),
        "processing generate request"
    );
    let start_time = std::time::Instant::now();

    // run on its own task so a panic inside the pipeline becomes a 500
    let pipeline = state.pipeline.clone();
    let results = tokio::spawn(async move { pipeline.process(&req).await })
        .await
        .map_err(|e| {
            error!(error = %e, "generate request failed");
            AppError::Internal(e.to_string())
        })?;

    let failed = results.iter().filter(|r| r.is_error()).count();
    info!(elapsed = ?start_time.elapsed(), results = results.len(), failed, "generate request finished");

    Ok(response::success(results))
}
