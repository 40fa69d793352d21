use crate::application::http::{fridge_analysis::router::FridgeAnalysisApiDoc, health::HealthApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FridgeChef API"
    ),
    nest(
        (path = "/fridge-analysis", api = FridgeAnalysisApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
