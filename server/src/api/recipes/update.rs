use crate::api::recipes::{message, parse_id, validation_failed, NO_RECIPE_FOUND};
use crate::get_conn;
use crate::models::RecipeChanges;
use crate::schema::recipes;
use crate::types::{self, format_cost, RecipeRequest};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

const UPDATE_FAILED: &str = "Recipe update failed!";

/// The submitted fields, echoed back after a successful update.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdatedRecipe {
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateRecipeResponse {
    pub message: String,
    pub recipe: Vec<UpdatedRecipe>,
}

#[utoipa::path(
    patch,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe updated. The body is a `FailureResponse` when a field is missing, or a `MessageResponse` when the recipe does not exist", body = UpdateRecipeResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let content = match RecipeRequest::from_body(&body).validate() {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Rejected recipe update: {}", e);
            return validation_failed(UPDATE_FAILED);
        }
    };

    let Some(id) = parse_id(&id) else {
        return message(NO_RECIPE_FOUND);
    };

    let mut conn = get_conn!(state.pool, message(UPDATE_FAILED));

    let changes = RecipeChanges {
        title: &content.title,
        making_time: &content.making_time,
        serves: &content.serves,
        ingredients: &content.ingredients,
        cost: content.cost,
        updated_at: types::now(),
    };

    // A single guarded statement: zero affected rows means the id does not exist.
    match diesel::update(recipes::table.find(id))
        .set(&changes)
        .execute(&mut conn)
    {
        Ok(0) => return message(NO_RECIPE_FOUND),
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Failed to update recipe {}: {}", id, e);
            return message(UPDATE_FAILED);
        }
    }

    tracing::info!(recipe_id = id, "Recipe updated");

    Json(UpdateRecipeResponse {
        message: "Recipe successfully updated!".to_string(),
        recipe: vec![UpdatedRecipe {
            cost: format_cost(content.cost),
            title: content.title,
            making_time: content.making_time,
            serves: content.serves,
            ingredients: content.ingredients,
        }],
    })
    .into_response()
}
