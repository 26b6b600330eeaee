pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use crate::api::{not_found, FailureResponse, MessageResponse};
use crate::types::REQUIRED_FIELDS;
use crate::AppState;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

/// Returns the router for the /recipes endpoints.
///
/// Every operation answers 200; the outcome is in the body's `message`.
/// Unsupported methods fall through to the catch-all response.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(list::list_recipes)
                .post(create::create_recipe)
                .fallback(not_found),
        )
        .route(
            "/recipes/{id}",
            get(get::get_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe)
                .fallback(not_found),
        )
}

pub(crate) const NO_RECIPE_FOUND: &str = "No Recipe found";

pub(crate) fn message(message: &str) -> Response {
    Json(MessageResponse::new(message)).into_response()
}

pub(crate) fn validation_failed(message: &str) -> Response {
    Json(FailureResponse {
        message: message.to_string(),
        required: REQUIRED_FIELDS.to_string(),
    })
    .into_response()
}

/// Path ids that are not integers can never match a row.
pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        list::list_recipes,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::types::RecipeRequest,
        create::CreateRecipeResponse,
        create::CreatedRecipe,
        list::ListRecipesResponse,
        list::RecipeSummary,
        get::RecipeDetailsResponse,
        update::UpdateRecipeResponse,
        update::UpdatedRecipe,
    ))
)]
pub struct ApiDoc;
