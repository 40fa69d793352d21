use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::entities::{FridgeImage, IngredientList, RecipeRecommendations},
};

/// LLM Client trait for calling AI models
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        model: String,
        prompt: String,
        image: FridgeImage,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        model: String,
        prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// The two inference stages. Each call is independent and stateless.
pub trait FridgeAnalysisService: Send + Sync {
    /// Perception ("Eyes"): photo in, ingredient text out.
    fn identify_ingredients(
        &self,
        image: FridgeImage,
    ) -> impl Future<Output = Result<IngredientList, CoreError>> + Send;

    /// Reasoning ("Brain"): ingredient text in, Markdown recipes out.
    fn recommend_recipes(
        &self,
        ingredients: &IngredientList,
    ) -> impl Future<Output = Result<RecipeRecommendations, CoreError>> + Send;
}
