//! Prompt templates for the two inference calls.

pub const NO_INGREDIENTS_FALLBACK: &str = "No ingredients found";

/// Instruction sent alongside the fridge photo.
pub const PERCEPTION_PROMPT: &str = r#"You are a pantry expert. Analyze this image of a fridge and list all
the edible food items and ingredients you can clearly identify, along with the
quantity available of each one.
Ignore non-food items, containers, and brands.
Output a simple, comma-separated list of items and quantities.

Example: eggs (6), milk (1 carton), broccoli (2 heads), cheddar cheese, chicken thighs (4)"#;

pub fn render_perception_prompt() -> String {
    PERCEPTION_PROMPT.to_string()
}

/// Instruction for the recipe call. `ingredients` is interpolated exactly as
/// the perception stage returned it.
pub fn render_recipe_prompt(ingredients: &str) -> String {
    format!(
        r#"You are a creative and practical chef. Your goal is to suggest 3
delicious dishes based *only* on the ingredients provided.
You can assume common pantry staples like salt, pepper, and oil are available.

Here are the ingredients I have: {ingredients}

Please return your 3 recommendations. For each dish, provide:
- **Dish Name:**
- **Description:** A short, enticing description.
- **Key Ingredients Used:** (from my list)

If no ingredients were found, return "{NO_INGREDIENTS_FALLBACK}"
Format each dish clearly using Markdown for headings and bold text."#
    )
}
