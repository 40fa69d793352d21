use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Multipart, State},
    response::sse::{Event, KeepAlive, Sse},
};
use fridgechef_core::domain::pipeline::{
    entities::PipelineState,
    ports::{PipelineObserver, PipelineService},
};
use futures::Stream;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::application::http::{
    fridge_analysis::validators::{UploadFridgeImage, read_fridge_image},
    server::{
        api_entities::api_error::{ApiError, ApiErrorResponse},
        app_state::AppState,
    },
};

/// Payload of every SSE message: the run id plus the state fields.
#[derive(Debug, Serialize)]
struct StreamEvent<'a> {
    id: Uuid,
    #[serde(flatten)]
    state: &'a PipelineState,
}

struct ChannelObserver {
    sender: mpsc::UnboundedSender<(Uuid, PipelineState)>,
}

impl PipelineObserver for ChannelObserver {
    fn on_transition(&self, run_id: Uuid, state: &PipelineState) {
        if self.sender.send((run_id, state.clone())).is_err() {
            debug!(analysis_id = %run_id, "SSE client went away");
        }
    }
}

#[utoipa::path(
    post,
    path = "/stream",
    tag = "fridge-analysis",
    summary = "Suggest dishes from a fridge photo, streaming progress",
    description = "Same pipeline as the plain endpoint, but every state transition is sent as a Server-Sent Event named after the state (analyzing, ingredients_ready, generating, recipes_ready, analysis_failed, generation_failed)",
    request_body(content = UploadFridgeImage, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stream of pipeline states", content_type = "text/event-stream"),
        (status = 400, body = ApiErrorResponse, description = "Missing or unsupported image"),
    ),
)]
pub async fn analyze_fridge_stream(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let image = read_fridge_image(multipart).await?;

    let (sender, mut receiver) = mpsc::unbounded_channel();
    let service = state.service.clone();

    tokio::spawn(async move {
        let observer = ChannelObserver { sender };
        if let Err(e) = service.run_pipeline(image, &observer).await {
            error!("Pipeline aborted: {}", e);
        }
    });

    let stream = async_stream::stream! {
        while let Some((run_id, pipeline_state)) = receiver.recv().await {
            let payload = StreamEvent { id: run_id, state: &pipeline_state };
            match Event::default().event(pipeline_state.name()).json_data(&payload) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => warn!("Failed to serialize pipeline state: {}", e),
            }
            if pipeline_state.is_terminal() {
                break;
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
