use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::common::entities::app_errors::CoreError;

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Debug)]
pub struct FridgeChefConfig {
    pub llm: LLMConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub perception_model: String,
    pub reasoning_model: String,
    /// Transport-level timeout for a single inference call. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl LLMConfig {
    /// Builds the LLM settings with default models and endpoint.
    pub fn new(gemini_api_key: impl Into<String>) -> Self {
        Self {
            gemini_api_key: gemini_api_key.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            perception_model: DEFAULT_GEMINI_MODEL.to_string(),
            reasoning_model: DEFAULT_GEMINI_MODEL.to_string(),
            request_timeout_secs: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini_base_url = base_url.into();
        self
    }

    pub fn with_models(
        mut self,
        perception_model: impl Into<String>,
        reasoning_model: impl Into<String>,
    ) -> Self {
        self.perception_model = perception_model.into();
        self.reasoning_model = reasoning_model.into();
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(CoreError::ConfigurationError(
                "API key not found. Set GOOGLE_API_KEY before starting the service.".to_string(),
            ));
        }
        if self.perception_model.trim().is_empty() || self.reasoning_model.trim().is_empty() {
            return Err(CoreError::ConfigurationError(
                "model identifiers must not be empty".to_string(),
            ));
        }
        if self.gemini_base_url.trim().is_empty() {
            return Err(CoreError::ConfigurationError(
                "Gemini base URL must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
