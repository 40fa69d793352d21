use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    fridge_analysis::entities::FridgeImage,
    pipeline::entities::{PipelineRun, PipelineState},
};

/// Receives every state the pipeline enters, in order. The presentation host
/// implements this to render progress, e.g. show the ingredient list before
/// recipes are requested.
pub trait PipelineObserver: Send + Sync {
    fn on_transition(&self, run_id: Uuid, state: &PipelineState);
}

/// Observer for callers that only need the final outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl PipelineObserver for SilentObserver {
    fn on_transition(&self, _run_id: Uuid, _state: &PipelineState) {}
}

pub trait PipelineService: Send + Sync {
    /// Runs perception then reasoning for one image. Stage failures end in a
    /// terminal failed state inside `Ok`; `Err` only reports a broken state machine.
    fn run_pipeline<O>(
        &self,
        image: FridgeImage,
        observer: &O,
    ) -> impl Future<Output = Result<PipelineRun, CoreError>> + Send
    where
        O: PipelineObserver;
}
