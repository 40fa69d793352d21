use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fridgechef_core::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::entities::IngredientList,
    pipeline::entities::{Stage, StageFailure},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

/// Body returned when one of the two inference stages failed.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StageFailureResponse {
    /// `perception` or `reasoning`.
    pub stage: String,
    pub message: String,
    /// Ingredient text found before the reasoning stage failed.
    pub ingredients: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{}", .failure.message)]
    StageFailed {
        failure: StageFailure,
        ingredients: Option<IngredientList>,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BadGateway(_) | ApiError::StageFailed { .. } => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "E_BAD_REQUEST",
            ApiError::BadGateway(_) => "E_BAD_GATEWAY",
            ApiError::InternalServerError(_) => "E_INTERNAL_SERVER_ERROR",
            ApiError::StageFailed { .. } => "E_STAGE_FAILED",
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidImage(detail) => ApiError::BadRequest(detail),
            CoreError::PerceptionServiceError(detail) => ApiError::StageFailed {
                failure: StageFailure::analysis(&detail),
                ingredients: None,
            },
            CoreError::ReasoningServiceError(detail) => ApiError::StageFailed {
                failure: StageFailure::generation(&detail),
                ingredients: None,
            },
            CoreError::ExternalServiceError(detail) => ApiError::BadGateway(detail),
            CoreError::ConfigurationError(_) | CoreError::InvalidStateTransition { .. } => {
                tracing::error!("Internal error: {}", error);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ApiError::StageFailed {
                failure,
                ingredients,
            } => {
                let stage = match failure.stage {
                    Stage::Perception => "perception",
                    Stage::Reasoning => "reasoning",
                };
                let body = StageFailureResponse {
                    stage: stage.to_string(),
                    message: failure.message,
                    ingredients: ingredients.map(IngredientList::into_inner),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ApiErrorResponse {
                    code: other.code().to_string(),
                    status: status.as_u16(),
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
