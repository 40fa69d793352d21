//! Scripted in-memory LLM client.
//!
//! Returns fixed replies per call kind and records every call in order, so
//! tests can assert on what was sent and when without network access.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::{entities::FridgeImage, ports::LLMClient},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMCallKind {
    Image,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLMCall {
    pub kind: LLMCallKind,
    pub model: String,
    pub prompt: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    image_response: Option<Result<String, String>>,
    text_response: Option<Result<String, String>>,
    calls: Vec<LLMCall>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeLLMClient {
    state: Arc<Mutex<FakeState>>,
}

impl FakeLLMClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply for every multimodal call. `Err` is surfaced as an external service failure.
    pub fn with_image_response(self, response: Result<String, String>) -> Self {
        self.lock().image_response = Some(response);
        self
    }

    /// Reply for every text-only call.
    pub fn with_text_response(self, response: Result<String, String>) -> Self {
        self.lock().text_response = Some(response);
        self
    }

    pub fn calls(&self) -> Vec<LLMCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: LLMCall) -> Result<String, CoreError> {
        let mut state = self.lock();
        let scripted = match call.kind {
            LLMCallKind::Image => state.image_response.clone(),
            LLMCallKind::Text => state.text_response.clone(),
        };
        state.calls.push(call);

        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(CoreError::ExternalServiceError(message)),
            None => Err(CoreError::ExternalServiceError(
                "no scripted response".to_string(),
            )),
        }
    }
}

impl LLMClient for FakeLLMClient {
    async fn generate_with_image(
        &self,
        model: String,
        prompt: String,
        image: FridgeImage,
    ) -> Result<String, CoreError> {
        self.record(LLMCall {
            kind: LLMCallKind::Image,
            model,
            prompt,
            mime_type: Some(image.mime_type().to_string()),
        })
    }

    async fn generate_with_text(&self, model: String, prompt: String) -> Result<String, CoreError> {
        self.record(LLMCall {
            kind: LLMCallKind::Text,
            model,
            prompt,
            mime_type: None,
        })
    }
}
