use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State, rejection::JsonRejection},
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::{Result, AppError};
use crate::api::models::{AnalyzeRequest, AnalyzeResponse};
use crate::api::response;
use crate::analyzer::analyze;
use crate::AppState;

pub const ROOT_MESSAGE: &str = "Link summary server is running! Send POST requests to /analyze";

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

async fn analyze_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected analyze body");
        AppError::InvalidRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })?;

    let urls = req.into_urls().inspect_err(|e| warn!(error = %e, "Rejected analyze request"))?;

    let start_time = std::time::Instant::now();
    let results = analyze(&state, urls).await;
    info!(count = results.len(), elapsed = ?start_time.elapsed(), "Analysis complete");

    Ok(response::success(AnalyzeResponse { results }))
}
