use std::sync::Arc;

use crate::domain::fridge_analysis::ports::LLMClient;

/// Model identifiers each stage is submitted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageModels {
    pub perception: String,
    pub reasoning: String,
}

/// Application service. Holds no per-request state; every pipeline run owns
/// its image, ingredient list and recipes.
#[derive(Debug)]
pub struct Service<LLM> {
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) models: StageModels,
}

impl<LLM> Clone for Service<LLM> {
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            models: self.models.clone(),
        }
    }
}

impl<LLM> Service<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, models: StageModels) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            models,
        }
    }

    pub fn models(&self) -> &StageModels {
        &self.models
    }
}
