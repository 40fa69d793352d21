use axum::extract::{Multipart, State};
use chrono::{DateTime, Utc};
use fridgechef_core::domain::pipeline::{
    entities::PipelineState,
    ports::{PipelineService, SilentObserver},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::{
    fridge_analysis::validators::{UploadFridgeImage, read_fridge_image},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, StageFailureResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FridgeAnalysisReport {
    pub id: Uuid,
    /// Ingredient text exactly as the perception model produced it.
    pub ingredients: String,
    /// Display-only comma split of `ingredients`.
    pub ingredient_items: Vec<String>,
    /// Markdown recipe recommendations.
    pub recipes: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeFridgeResponse {
    pub data: FridgeAnalysisReport,
}

#[utoipa::path(
    post,
    path = "",
    tag = "fridge-analysis",
    summary = "Suggest dishes from a fridge photo",
    description = "Identifies the ingredients in the photo, then asks the model for three dishes using only those ingredients",
    request_body(content = UploadFridgeImage, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeFridgeResponse),
        (status = 400, body = ApiErrorResponse, description = "Missing or unsupported image"),
        (status = 502, body = StageFailureResponse, description = "An inference stage failed"),
    ),
)]
pub async fn analyze_fridge(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response<AnalyzeFridgeResponse>, ApiError> {
    let image = read_fridge_image(multipart).await?;

    let run = state
        .service
        .run_pipeline(image, &SilentObserver)
        .await
        .map_err(ApiError::from)?;

    match run.state {
        PipelineState::RecipesReady {
            ingredients,
            recipes,
        } => Ok(Response::OK(AnalyzeFridgeResponse {
            data: FridgeAnalysisReport {
                id: run.id,
                ingredient_items: ingredients.entries(),
                ingredients: ingredients.into_inner(),
                recipes: recipes.into_inner(),
                started_at: run.started_at,
                completed_at: run.completed_at,
            },
        })),
        PipelineState::AnalysisFailed { failure } => Err(ApiError::StageFailed {
            failure,
            ingredients: None,
        }),
        PipelineState::GenerationFailed {
            ingredients,
            failure,
        } => Err(ApiError::StageFailed {
            failure,
            ingredients: Some(ingredients),
        }),
        other => {
            tracing::error!(state = other.name(), "Pipeline ended in a non-terminal state");
            Err(ApiError::InternalServerError(
                "Internal server error".to_string(),
            ))
        }
    }
}
