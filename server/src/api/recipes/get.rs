use crate::api::recipes::list::RecipeSummary;
use crate::api::recipes::parse_id;
use crate::get_conn;
use crate::models::RecipeOverview;
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDetailsResponse {
    pub message: String,
    /// Zero or one recipe.
    pub recipe: Vec<RecipeSummary>,
}

fn details_response(state: &AppState, recipe: Option<RecipeSummary>) -> Response {
    (
        [(header::CACHE_CONTROL, state.cache_control.clone())],
        Json(RecipeDetailsResponse {
            message: "Recipe details by id".to_string(),
            recipe: recipe.into_iter().collect(),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "The recipe, or an empty list when it does not exist", body = RecipeDetailsResponse)
    )
)]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let Some(id) = parse_id(&id) else {
        return details_response(&state, None);
    };

    let mut conn = get_conn!(state.pool, details_response(&state, None));

    let recipe: Option<RecipeOverview> = match recipes::table
        .find(id)
        .select(RecipeOverview::as_select())
        .first(&mut conn)
        .optional()
    {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::error!("Failed to fetch recipe {}: {}", id, e);
            None
        }
    };

    details_response(&state, recipe.map(RecipeSummary::from))
}
