use crate::{
    domain::common::{
        FridgeChefConfig, entities::app_errors::CoreError,
        services::{Service, StageModels},
    },
    infrastructure::llm::GeminiLLMClient,
};

pub type FridgeChefService = Service<GeminiLLMClient>;

/// Builds the service from an explicit configuration. Fails before any client
/// exists when the credential is missing, so no request can go out.
pub fn create_service(config: FridgeChefConfig) -> Result<FridgeChefService, CoreError> {
    config.llm.validate()?;

    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(
        perception_model = %config.llm.perception_model,
        reasoning_model = %config.llm.reasoning_model,
        "FridgeChef service initialized"
    );

    Ok(Service::new(
        llm_client,
        StageModels {
            perception: config.llm.perception_model,
            reasoning: config.llm.reasoning_model,
        },
    ))
}
