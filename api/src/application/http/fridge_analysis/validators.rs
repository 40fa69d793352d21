use axum::extract::Multipart;
use fridgechef_core::domain::fridge_analysis::entities::{FridgeImage, MAX_IMAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Multipart body accepted by the analysis endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadFridgeImage {
    /// JPEG or PNG photo of the fridge interior.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Reads the `image` field and normalizes it. Unknown fields are ignored.
pub async fn read_fridge_image(mut multipart: Multipart) -> Result<FridgeImage, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

            if data.len() > MAX_IMAGE_SIZE {
                return Err(ApiError::BadRequest(format!(
                    "Image too large. Max size is {} bytes",
                    MAX_IMAGE_SIZE
                )));
            }

            image_data = Some(data.to_vec());
        }
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    // Full decode of up to 10MB is CPU bound.
    tokio::task::spawn_blocking(move || FridgeImage::from_bytes(image_data))
        .await
        .map_err(|e| {
            error!("Image normalization task failed: {}", e);
            ApiError::InternalServerError("Internal server error".to_string())
        })?
        .map_err(ApiError::from)
}
