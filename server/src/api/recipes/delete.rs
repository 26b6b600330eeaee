use crate::api::recipes::{message, parse_id, NO_RECIPE_FOUND};
use crate::api::MessageResponse;
use crate::get_conn;
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::prelude::*;

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "\"Recipe successfully removed!\", or \"No Recipe found\"", body = MessageResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let Some(id) = parse_id(&id) else {
        return message(NO_RECIPE_FOUND);
    };

    let mut conn = get_conn!(state.pool, message(NO_RECIPE_FOUND));

    match diesel::delete(recipes::table.find(id)).execute(&mut conn) {
        Ok(0) => message(NO_RECIPE_FOUND),
        Ok(_) => {
            tracing::info!(recipe_id = id, "Recipe deleted");
            message("Recipe successfully removed!")
        }
        // Callers only ever see "not found" for a failed delete.
        Err(e) => {
            tracing::error!("Failed to delete recipe {}: {}", id, e);
            message(NO_RECIPE_FOUND)
        }
    }
}
