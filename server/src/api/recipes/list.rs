use crate::get_conn;
use crate::models::RecipeOverview;
use crate::schema::recipes;
use crate::types::format_cost;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// A recipe as returned by the read endpoints; timestamps are not exposed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: i32,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    #[schema(example = "1000")]
    pub cost: String,
}

impl From<RecipeOverview> for RecipeSummary {
    fn from(row: RecipeOverview) -> Self {
        Self {
            id: row.id,
            title: row.title,
            making_time: row.making_time,
            serves: row.serves,
            ingredients: row.ingredients,
            cost: format_cost(row.cost),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
}

fn list_response(state: &AppState, recipes: Vec<RecipeSummary>) -> Response {
    (
        [(header::CACHE_CONTROL, state.cache_control.clone())],
        Json(ListRecipesResponse { recipes }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes in insertion order; empty on storage failure", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(State(state): State<AppState>) -> impl IntoResponse {
    let mut conn = get_conn!(state.pool, list_response(&state, Vec::new()));

    let rows: Vec<RecipeOverview> = match recipes::table
        .order(recipes::id.asc())
        .select(RecipeOverview::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to list recipes: {}", e);
            return list_response(&state, Vec::new());
        }
    };

    list_response(&state, rows.into_iter().map(RecipeSummary::from).collect())
}
