use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    fridge_analysis::{
        entities::{FridgeImage, IngredientList, RecipeRecommendations},
        ports::{FridgeAnalysisService, LLMClient},
        prompts::{render_perception_prompt, render_recipe_prompt},
    },
};

impl<LLM> FridgeAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip(self, image), fields(model = %self.models.perception, format = ?image.format()))]
    async fn identify_ingredients(&self, image: FridgeImage) -> Result<IngredientList, CoreError> {
        let raw_response = self
            .llm_client
            .generate_with_image(
                self.models.perception.clone(),
                render_perception_prompt(),
                image,
            )
            .await
            .map_err(|e| {
                tracing::error!("Perception call failed: {}", e);
                CoreError::PerceptionServiceError(e.detail())
            })?;

        tracing::debug!(chars = raw_response.len(), "Ingredients identified");

        Ok(IngredientList::new(raw_response))
    }

    #[instrument(skip(self, ingredients), fields(model = %self.models.reasoning, blank_input = ingredients.is_blank()))]
    async fn recommend_recipes(
        &self,
        ingredients: &IngredientList,
    ) -> Result<RecipeRecommendations, CoreError> {
        // Blank ingredient text still goes out: the prompt has the model answer
        // with the "No ingredients found" fallback.
        let prompt = render_recipe_prompt(ingredients.as_str());

        let raw_response = self
            .llm_client
            .generate_with_text(self.models.reasoning.clone(), prompt)
            .await
            .map_err(|e| {
                tracing::error!("Reasoning call failed: {}", e);
                CoreError::ReasoningServiceError(e.detail())
            })?;

        if raw_response.trim().is_empty() {
            tracing::error!("Reasoning call returned an empty response");
            return Err(CoreError::ReasoningServiceError(
                "the model returned an empty response".to_string(),
            ));
        }

        Ok(RecipeRecommendations::new(raw_response))
    }
}
