pub mod recipes;

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Response carrying only a status message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for a create or update whose input failed validation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailureResponse {
    pub message: String,
    /// Comma-separated names of the fields every request must carry.
    pub required: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Routes of the service; everything else lands on [`not_found`].
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(recipes::router())
        .fallback(not_found)
}

/// Catch-all for requests that match no route or method.
pub async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    (state.not_found_status, Json(MessageResponse::new("Not Found")))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipe API", description = "CRUD service for recipe records"),
        components(schemas(MessageResponse, FailureResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(recipes::ApiDoc::openapi());
    spec
}
