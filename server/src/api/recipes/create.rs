use crate::api::recipes::validation_failed;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use crate::types::{self, format_cost, format_timestamp, RecipeRequest};
use crate::AppState;
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

const CREATION_FAILED: &str = "Recipe creation failed!";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedRecipe {
    pub id: i32,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: String,
    #[schema(example = "2016-01-10 12:10:12")]
    pub created_at: String,
    #[schema(example = "2016-01-10 12:10:12")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub message: String,
    pub recipe: Vec<CreatedRecipe>,
}

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe created. A `FailureResponse` is returned instead when a field is missing or the insert fails", body = CreateRecipeResponse)
    )
)]
pub async fn create_recipe(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let content = match RecipeRequest::from_body(&body).validate() {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Rejected recipe creation: {}", e);
            return validation_failed(CREATION_FAILED);
        }
    };

    let mut conn = get_conn!(state.pool, validation_failed(CREATION_FAILED));

    let now = types::now();
    let new_recipe = NewRecipe {
        title: &content.title,
        making_time: &content.making_time,
        serves: &content.serves,
        ingredients: &content.ingredients,
        cost: content.cost,
        created_at: now,
        updated_at: now,
    };

    // The response is built from the input and the returned id; no re-read.
    let id: i32 = match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(recipes::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return validation_failed(CREATION_FAILED);
        }
    };

    tracing::info!(recipe_id = id, "Recipe created");

    let timestamp = format_timestamp(now);
    Json(CreateRecipeResponse {
        message: "Recipe successfully created!".to_string(),
        recipe: vec![CreatedRecipe {
            id,
            cost: format_cost(content.cost),
            title: content.title,
            making_time: content.making_time,
            serves: content.serves,
            ingredients: content.ingredients,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }],
    })
    .into_response()
}
