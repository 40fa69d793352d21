use super::handlers::{
    analyze_fridge::{__path_analyze_fridge, analyze_fridge},
    analyze_fridge_stream::{__path_analyze_fridge_stream, analyze_fridge_stream},
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use fridgechef_core::domain::fridge_analysis::entities::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

/// Room for multipart boundaries and headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_fridge, analyze_fridge_stream))]
pub struct FridgeAnalysisApiDoc;

pub fn fridge_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/fridge-analysis", state.args.server.root_path),
            post(analyze_fridge),
        )
        .route(
            &format!("{}/fridge-analysis/stream", state.args.server.root_path),
            post(analyze_fridge_stream),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
}
