use std::io::Cursor;

use image::ImageReader;
use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// Maximum accepted upload size (10MB).
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    fn from_detected(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// A verified photo of a fridge, held in memory for a single pipeline run.
#[derive(Clone, PartialEq, Eq)]
pub struct FridgeImage {
    data: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl FridgeImage {
    /// Sniffs the encoding from the bytes themselves, rejects anything that is
    /// not JPEG or PNG, and decodes once so a truncated or corrupt upload never
    /// reaches the model.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CoreError> {
        if data.is_empty() {
            return Err(CoreError::InvalidImage("image is empty".to_string()));
        }
        if data.len() > MAX_IMAGE_SIZE {
            return Err(CoreError::InvalidImage(format!(
                "image too large: {} bytes (max {})",
                data.len(),
                MAX_IMAGE_SIZE
            )));
        }

        let reader = ImageReader::new(Cursor::new(data.as_slice()))
            .with_guessed_format()
            .map_err(|e| CoreError::InvalidImage(format!("failed to read image: {}", e)))?;

        let detected = reader
            .format()
            .ok_or_else(|| CoreError::InvalidImage("could not detect image format".to_string()))?;

        let format = ImageFormat::from_detected(detected).ok_or_else(|| {
            CoreError::InvalidImage(format!(
                "unsupported image format: {:?}. Allowed: JPEG, PNG",
                detected
            ))
        })?;

        let decoded = reader
            .decode()
            .map_err(|e| CoreError::InvalidImage(format!("failed to decode image: {}", e)))?;

        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            data,
            format,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl std::fmt::Debug for FridgeImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FridgeImage")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// Free text produced by the perception stage. Nothing about its shape is
/// guaranteed: it may be empty, not comma separated, or list things that are
/// not in the fridge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientList(String);

impl IngredientList {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Best-effort comma split for display. Never used to decide what the
    /// reasoning stage receives.
    pub fn entries(&self) -> Vec<String> {
        self.0
            .split([',', '\n'])
            .map(|entry| {
                let entry = entry.trim();
                entry
                    .strip_prefix("- ")
                    .or_else(|| entry.strip_prefix("* "))
                    .unwrap_or(entry)
                    .trim()
            })
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Markdown produced by the reasoning stage, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeRecommendations(String);

impl RecipeRecommendations {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self(markdown.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
