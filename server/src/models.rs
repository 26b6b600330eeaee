use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Business columns of a recipe row, without timestamps.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecipeOverview {
    pub id: i32,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub making_time: &'a str,
    pub serves: &'a str,
    pub ingredients: &'a str,
    pub cost: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Full replace of the business fields; created_at is never touched.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub making_time: &'a str,
    pub serves: &'a str,
    pub ingredients: &'a str,
    pub cost: f64,
    pub updated_at: NaiveDateTime,
}
