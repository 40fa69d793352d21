use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::entities::{IngredientList, RecipeRecommendations},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Perception,
    Reasoning,
}

/// User-facing report of a failed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}

impl StageFailure {
    pub fn analysis(detail: &str) -> Self {
        Self {
            stage: Stage::Perception,
            message: format!(
                "Error analyzing image: {}. The AI couldn't understand the image. Try a clearer photo.",
                detail
            ),
        }
    }

    pub fn generation(detail: &str) -> Self {
        Self {
            stage: Stage::Reasoning,
            message: format!(
                "Error generating recipes: {}. The AI might be busy or the ingredients list was unclear. Please try again.",
                detail
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    AwaitingImage,
    Analyzing,
    IngredientsReady {
        ingredients: IngredientList,
    },
    Generating {
        ingredients: IngredientList,
    },
    RecipesReady {
        ingredients: IngredientList,
        recipes: RecipeRecommendations,
    },
    AnalysisFailed {
        failure: StageFailure,
    },
    GenerationFailed {
        ingredients: IngredientList,
        failure: StageFailure,
    },
}

impl PipelineState {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Idle => "idle",
            PipelineState::AwaitingImage => "awaiting_image",
            PipelineState::Analyzing => "analyzing",
            PipelineState::IngredientsReady { .. } => "ingredients_ready",
            PipelineState::Generating { .. } => "generating",
            PipelineState::RecipesReady { .. } => "recipes_ready",
            PipelineState::AnalysisFailed { .. } => "analysis_failed",
            PipelineState::GenerationFailed { .. } => "generation_failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::RecipesReady { .. }
                | PipelineState::AnalysisFailed { .. }
                | PipelineState::GenerationFailed { .. }
        )
    }

    pub fn ingredients(&self) -> Option<&IngredientList> {
        match self {
            PipelineState::IngredientsReady { ingredients }
            | PipelineState::Generating { ingredients }
            | PipelineState::RecipesReady { ingredients, .. }
            | PipelineState::GenerationFailed { ingredients, .. } => Some(ingredients),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&StageFailure> {
        match self {
            PipelineState::AnalysisFailed { failure }
            | PipelineState::GenerationFailed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Start,
    ImageReceived,
    IngredientsIdentified(IngredientList),
    GenerationStarted,
    RecipesGenerated(RecipeRecommendations),
    AnalysisError(String),
    GenerationError(String),
}

impl PipelineEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineEvent::Start => "start",
            PipelineEvent::ImageReceived => "image_received",
            PipelineEvent::IngredientsIdentified(_) => "ingredients_identified",
            PipelineEvent::GenerationStarted => "generation_started",
            PipelineEvent::RecipesGenerated(_) => "recipes_generated",
            PipelineEvent::AnalysisError(_) => "analysis_error",
            PipelineEvent::GenerationError(_) => "generation_error",
        }
    }
}

/// One analysis request. Terminal states accept no further events; a new
/// upload gets a new machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStateMachine {
    state: PipelineState,
}

impl Default for PipelineStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStateMachine {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn into_state(self) -> PipelineState {
        self.state
    }

    /// Applies `event`, leaving the state untouched when the transition is not allowed.
    pub fn fire(&mut self, event: PipelineEvent) -> Result<&PipelineState, CoreError> {
        let next = match (&self.state, event) {
            (PipelineState::Idle, PipelineEvent::Start) => PipelineState::AwaitingImage,
            (PipelineState::AwaitingImage, PipelineEvent::ImageReceived) => {
                PipelineState::Analyzing
            }
            (PipelineState::Analyzing, PipelineEvent::IngredientsIdentified(ingredients)) => {
                PipelineState::IngredientsReady { ingredients }
            }
            (PipelineState::Analyzing, PipelineEvent::AnalysisError(detail)) => {
                PipelineState::AnalysisFailed {
                    failure: StageFailure::analysis(&detail),
                }
            }
            (PipelineState::IngredientsReady { ingredients }, PipelineEvent::GenerationStarted) => {
                PipelineState::Generating {
                    ingredients: ingredients.clone(),
                }
            }
            (PipelineState::Generating { ingredients }, PipelineEvent::RecipesGenerated(recipes)) => {
                PipelineState::RecipesReady {
                    ingredients: ingredients.clone(),
                    recipes,
                }
            }
            (PipelineState::Generating { ingredients }, PipelineEvent::GenerationError(detail)) => {
                PipelineState::GenerationFailed {
                    ingredients: ingredients.clone(),
                    failure: StageFailure::generation(&detail),
                }
            }
            (state, event) => {
                return Err(CoreError::InvalidStateTransition {
                    from: state.name().to_string(),
                    event: event.name().to_string(),
                });
            }
        };

        self.state = next;
        Ok(&self.state)
    }
}

/// Outcome of one pipeline run. `state` is always terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    pub id: Uuid,
    pub state: PipelineState,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_in_generating() -> PipelineStateMachine {
        let mut machine = PipelineStateMachine::new();
        machine.fire(PipelineEvent::Start).unwrap();
        machine.fire(PipelineEvent::ImageReceived).unwrap();
        machine
            .fire(PipelineEvent::IngredientsIdentified(IngredientList::new(
                "eggs, milk",
            )))
            .unwrap();
        machine.fire(PipelineEvent::GenerationStarted).unwrap();
        machine
    }

    #[test]
    fn test_happy_path_reaches_recipes_ready() {
        let mut machine = machine_in_generating();
        let state = machine
            .fire(PipelineEvent::RecipesGenerated(RecipeRecommendations::new(
                "**Omelette**",
            )))
            .unwrap();

        assert_eq!(
            state,
            &PipelineState::RecipesReady {
                ingredients: IngredientList::new("eggs, milk"),
                recipes: RecipeRecommendations::new("**Omelette**"),
            }
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn test_generation_cannot_start_while_analyzing() {
        let mut machine = PipelineStateMachine::new();
        machine.fire(PipelineEvent::Start).unwrap();
        machine.fire(PipelineEvent::ImageReceived).unwrap();

        let err = machine.fire(PipelineEvent::GenerationStarted).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidStateTransition {
                from: "analyzing".to_string(),
                event: "generation_started".to_string(),
            }
        );
        assert_eq!(machine.state(), &PipelineState::Analyzing);
    }

    #[test]
    fn test_analysis_failure_is_terminal() {
        let mut machine = PipelineStateMachine::new();
        machine.fire(PipelineEvent::Start).unwrap();
        machine.fire(PipelineEvent::ImageReceived).unwrap();
        machine
            .fire(PipelineEvent::AnalysisError("quota".to_string()))
            .unwrap();

        assert!(machine.state().is_terminal());
        assert!(machine.fire(PipelineEvent::ImageReceived).is_err());
        assert!(machine.fire(PipelineEvent::Start).is_err());
        assert!(machine.fire(PipelineEvent::GenerationStarted).is_err());
    }

    #[test]
    fn test_generation_failure_keeps_ingredients() {
        let mut machine = machine_in_generating();
        machine
            .fire(PipelineEvent::GenerationError("busy".to_string()))
            .unwrap();

        let state = machine.into_state();
        assert_eq!(state.name(), "generation_failed");
        assert_eq!(state.ingredients().map(|i| i.as_str()), Some("eggs, milk"));
        assert_eq!(state.failure().map(|f| f.stage), Some(Stage::Reasoning));
    }

    #[test]
    fn test_image_must_follow_start() {
        let mut machine = PipelineStateMachine::new();
        assert!(machine.fire(PipelineEvent::ImageReceived).is_err());
        assert_eq!(machine.state(), &PipelineState::Idle);
    }

    #[test]
    fn test_failure_messages_name_their_stage() {
        let analysis = StageFailure::analysis("boom");
        let generation = StageFailure::generation("boom");

        assert!(analysis.message.contains("analyzing image"));
        assert!(generation.message.contains("generating recipes"));
        assert_ne!(analysis.message, generation.message);
        assert_eq!(analysis.stage, Stage::Perception);
    }

    #[test]
    fn test_state_serializes_with_tag() {
        let state = PipelineState::IngredientsReady {
            ingredients: IngredientList::new("eggs"),
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "state": "ingredients_ready", "ingredients": "eggs" })
        );
    }
}
