use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    fridge_analysis::{
        entities::FridgeImage,
        ports::{FridgeAnalysisService, LLMClient},
    },
    pipeline::{
        entities::{PipelineEvent, PipelineRun, PipelineStateMachine},
        ports::{PipelineObserver, PipelineService},
    },
};

fn advance<O>(
    machine: &mut PipelineStateMachine,
    event: PipelineEvent,
    observer: &O,
    run_id: Uuid,
) -> Result<(), CoreError>
where
    O: PipelineObserver,
{
    let state = machine.fire(event)?;
    tracing::debug!(analysis_id = %run_id, state = state.name(), "Pipeline transition");
    observer.on_transition(run_id, state);
    Ok(())
}

impl<LLM> PipelineService for Service<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip(self, image, observer), fields(analysis_id))]
    async fn run_pipeline<O>(
        &self,
        image: FridgeImage,
        observer: &O,
    ) -> Result<PipelineRun, CoreError>
    where
        O: PipelineObserver,
    {
        let run_id = generate_uuid_v7();
        tracing::Span::current().record("analysis_id", tracing::field::display(run_id));
        let started_at = Utc::now();
        let mut machine = PipelineStateMachine::new();

        advance(&mut machine, PipelineEvent::Start, observer, run_id)?;
        advance(&mut machine, PipelineEvent::ImageReceived, observer, run_id)?;

        tracing::info!("Analyzing fridge image");
        let ingredients = match self.identify_ingredients(image).await {
            Ok(ingredients) => ingredients,
            Err(e) => {
                tracing::warn!("Pipeline stopped after perception failure: {}", e);
                advance(
                    &mut machine,
                    PipelineEvent::AnalysisError(e.detail()),
                    observer,
                    run_id,
                )?;
                return Ok(PipelineRun {
                    id: run_id,
                    state: machine.into_state(),
                    started_at,
                    completed_at: Utc::now(),
                });
            }
        };

        advance(
            &mut machine,
            PipelineEvent::IngredientsIdentified(ingredients.clone()),
            observer,
            run_id,
        )?;
        advance(&mut machine, PipelineEvent::GenerationStarted, observer, run_id)?;

        tracing::info!("Generating recipes");
        let event = match self.recommend_recipes(&ingredients).await {
            Ok(recipes) => PipelineEvent::RecipesGenerated(recipes),
            Err(e) => {
                tracing::warn!("Pipeline stopped after reasoning failure: {}", e);
                PipelineEvent::GenerationError(e.detail())
            }
        };
        advance(&mut machine, event, observer, run_id)?;

        let state = machine.into_state();
        tracing::info!(state = state.name(), "Pipeline finished");

        Ok(PipelineRun {
            id: run_id,
            state,
            started_at,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        domain::{
            common::services::StageModels,
            fridge_analysis::{
                entities::{IngredientList, RecipeRecommendations, test_images},
                prompts::NO_INGREDIENTS_FALLBACK,
            },
            pipeline::{
                entities::{PipelineState, Stage},
                ports::SilentObserver,
            },
        },
        infrastructure::llm::fake_client::{FakeLLMClient, LLMCallKind},
    };

    #[derive(Default)]
    struct RecordingObserver {
        seen: Mutex<Vec<(Uuid, String)>>,
    }

    impl RecordingObserver {
        fn names(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|(_, name)| name.clone())
                .collect()
        }
    }

    impl PipelineObserver for RecordingObserver {
        fn on_transition(&self, run_id: Uuid, state: &PipelineState) {
            self.seen
                .lock()
                .unwrap()
                .push((run_id, state.name().to_string()));
        }
    }

    fn service(client: FakeLLMClient) -> Service<FakeLLMClient> {
        Service::new(
            client,
            StageModels {
                perception: "vision".to_string(),
                reasoning: "text".to_string(),
            },
        )
    }

    fn image() -> FridgeImage {
        FridgeImage::from_bytes(test_images::jpeg()).unwrap()
    }

    #[tokio::test]
    async fn test_perception_runs_once_before_reasoning() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok("eggs, milk, broccoli".to_string()))
            .with_text_response(Ok("**Frittata**".to_string()));
        let observer = RecordingObserver::default();

        let run = service(client.clone())
            .run_pipeline(image(), &observer)
            .await
            .unwrap();

        let kinds: Vec<LLMCallKind> = client.calls().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![LLMCallKind::Image, LLMCallKind::Text]);
        assert!(client.calls()[1].prompt.contains("eggs, milk, broccoli"));

        assert_eq!(
            run.state,
            PipelineState::RecipesReady {
                ingredients: IngredientList::new("eggs, milk, broccoli"),
                recipes: RecipeRecommendations::new("**Frittata**"),
            }
        );
        assert!(run.completed_at >= run.started_at);
    }

    #[tokio::test]
    async fn test_observer_sees_every_transition_in_order() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok("eggs".to_string()))
            .with_text_response(Ok("**Boiled eggs**".to_string()));
        let observer = RecordingObserver::default();

        let run = service(client)
            .run_pipeline(image(), &observer)
            .await
            .unwrap();

        assert_eq!(
            observer.names(),
            vec![
                "awaiting_image",
                "analyzing",
                "ingredients_ready",
                "generating",
                "recipes_ready"
            ]
        );
        assert!(
            observer
                .seen
                .lock()
                .unwrap()
                .iter()
                .all(|(id, _)| *id == run.id)
        );
    }

    #[tokio::test]
    async fn test_perception_failure_never_reaches_reasoning() {
        let client = FakeLLMClient::new()
            .with_image_response(Err("safety filter".to_string()))
            .with_text_response(Ok("unused".to_string()));
        let observer = RecordingObserver::default();

        let run = service(client.clone())
            .run_pipeline(image(), &observer)
            .await
            .unwrap();

        assert_eq!(client.calls().len(), 1);
        assert_eq!(client.calls()[0].kind, LLMCallKind::Image);
        assert_eq!(run.state.name(), "analysis_failed");

        let failure = run.state.failure().unwrap();
        assert_eq!(failure.stage, Stage::Perception);
        assert!(failure.message.contains("image"));
        assert!(failure.message.contains("analyzing"));
        assert!(failure.message.contains("safety filter"));
        assert_eq!(
            observer.names(),
            vec!["awaiting_image", "analyzing", "analysis_failed"]
        );
    }

    #[tokio::test]
    async fn test_reasoning_failure_is_generation_failed() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok("eggs".to_string()))
            .with_text_response(Err("model overloaded".to_string()));

        let run = service(client)
            .run_pipeline(image(), &SilentObserver)
            .await
            .unwrap();

        assert_eq!(run.state.name(), "generation_failed");
        assert_eq!(run.state.ingredients().map(|i| i.as_str()), Some("eggs"));

        let failure = run.state.failure().unwrap();
        assert_eq!(failure.stage, Stage::Reasoning);
        assert!(failure.message.contains("recipes"));
        assert!(failure.message.contains("generating"));
    }

    #[tokio::test]
    async fn test_observer_sees_generation_failure_after_generating() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok("eggs, milk".to_string()))
            .with_text_response(Err("503 Service Unavailable".to_string()));
        let observer = RecordingObserver::default();

        let run = service(client)
            .run_pipeline(image(), &observer)
            .await
            .unwrap();

        assert_eq!(
            observer.names(),
            vec![
                "awaiting_image",
                "analyzing",
                "ingredients_ready",
                "generating",
                "generation_failed"
            ]
        );
        assert!(run.state.is_terminal());
        assert_eq!(run.state.ingredients().map(|i| i.as_str()), Some("eggs, milk"));
    }

    #[tokio::test]
    async fn test_failure_messages_differ_between_stages() {
        let perception_failed = service(
            FakeLLMClient::new().with_image_response(Err("unavailable".to_string())),
        )
        .run_pipeline(image(), &SilentObserver)
        .await
        .unwrap();

        let reasoning_failed = service(
            FakeLLMClient::new()
                .with_image_response(Ok("eggs".to_string()))
                .with_text_response(Err("unavailable".to_string())),
        )
        .run_pipeline(image(), &SilentObserver)
        .await
        .unwrap();

        assert_ne!(
            perception_failed.state.failure().unwrap().message,
            reasoning_failed.state.failure().unwrap().message
        );
    }

    #[tokio::test]
    async fn test_empty_ingredients_still_request_recipes() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok(String::new()))
            .with_text_response(Ok(NO_INGREDIENTS_FALLBACK.to_string()));

        let run = service(client.clone())
            .run_pipeline(image(), &SilentObserver)
            .await
            .unwrap();

        let text_calls = client
            .calls()
            .into_iter()
            .filter(|c| c.kind == LLMCallKind::Text)
            .count();
        assert_eq!(text_calls, 1);
        assert_eq!(run.state.name(), "recipes_ready");
    }

    #[tokio::test]
    async fn test_each_run_gets_its_own_id() {
        let client = FakeLLMClient::new()
            .with_image_response(Ok("eggs".to_string()))
            .with_text_response(Ok("**Eggs**".to_string()));
        let service = service(client);

        let first = service.run_pipeline(image(), &SilentObserver).await.unwrap();
        let second = service.run_pipeline(image(), &SilentObserver).await.unwrap();
        assert_ne!(first.id, second.id);
    }
}
