use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    handlers::auth::MessageResponse,
    models::claims::Claims,
    models::recipe::{NewRecipe, Recipe, RecipePatch},
    services::recipes as recipe_service,
    state::AppState,
};

/// The query parameters for recipe search.
#[derive(Deserialize, Debug)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// The request payload for bookmarking a recipe.
#[derive(Deserialize, Debug)]
pub struct SaveRecipeRequest {
    #[serde(rename = "recipeID")]
    pub recipe_id: Uuid,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

/// The response payload carrying a saved-recipe id sequence.
#[derive(Serialize)]
pub struct SavedIdsResponse {
    #[serde(rename = "savedRecipes")]
    pub saved_recipes: Vec<Uuid>,
}

/// The response payload carrying hydrated saved recipes.
#[derive(Serialize)]
pub struct SavedRecipesResponse {
    #[serde(rename = "savedRecipes")]
    pub saved_recipes: Vec<Recipe>,
}

/// The response payload for an admin-status query.
#[derive(Serialize)]
pub struct AdminStatusResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// The response payload for a username lookup.
#[derive(Serialize)]
pub struct UsernameResponse {
    pub username: String,
}

/// The response payload for an admin recipe edit.
#[derive(Serialize)]
pub struct EditRecipeResponse {
    pub message: String,
    pub recipe: Recipe,
}

/// Returns every recipe.
#[axum::debug_handler]
pub async fn list_recipes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recipes = recipe_service::list_recipes(&state.db).await?;
    Ok(Json(recipes))
}

/// Creates a new recipe. Requires a valid token.
#[axum::debug_handler]
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NewRecipe>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Recipe creation by user: {}", claims.id);
    let recipe = recipe_service::create_recipe(&state.db, payload).await?;
    Ok(Json(recipe))
}

/// Searches recipes by name fragment. An empty or absent fragment returns
/// the unfiltered set.
#[axum::debug_handler]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let recipes = recipe_service::search_recipes(&state.db, params.name.as_deref()).await?;
    Ok(Json(recipes))
}

/// Bookmarks a recipe for a user and returns the updated id sequence.
#[axum::debug_handler]
pub async fn add_saved_recipe(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SaveRecipeRequest>,
) -> Result<impl IntoResponse> {
    tracing::debug!(
        "🔖 User {} saving recipe {} (requested by {})",
        payload.user_id,
        payload.recipe_id,
        claims.id
    );
    let saved_recipes =
        recipe_service::add_saved(&state.db, &payload.recipe_id, &payload.user_id).await?;
    Ok(Json(SavedIdsResponse { saved_recipes }))
}

/// Returns the raw saved-recipe id sequence for a user.
#[axum::debug_handler]
pub async fn saved_recipe_ids(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let saved_recipes = recipe_service::saved_recipe_ids(&state.db, &user_id).await?;
    Ok(Json(SavedIdsResponse { saved_recipes }))
}

/// Returns the hydrated saved recipes for a user.
#[axum::debug_handler]
pub async fn saved_recipes(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let saved_recipes = recipe_service::saved_recipes(&state.db, &user_id).await?;
    Ok(Json(SavedRecipesResponse { saved_recipes }))
}

/// Returns a single recipe by id.
#[axum::debug_handler]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let recipe = recipe_service::get_recipe(&state.db, &recipe_id).await?;
    Ok(Json(recipe))
}

/// Returns the username of a user.
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let username = recipe_service::get_username(&state.db, &user_id).await?;
    Ok(Json(UsernameResponse { username }))
}

/// Removes a recipe from a user's saved sequence.
#[axum::debug_handler]
pub async fn delete_saved_recipe(
    State(state): State<AppState>,
    Path((user_id, recipe_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    recipe_service::remove_saved(&state.db, &user_id, &recipe_id).await?;
    Ok(Json(MessageResponse {
        message: "Recipe has been deleted.".to_string(),
    }))
}

/// Deletes a recipe. Requires a token whose claims carry the admin flag.
#[axum::debug_handler]
pub async fn delete_recipe_as_admin(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(recipe_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    recipe_service::delete_recipe_as_admin(&state.db, &claims, &recipe_id).await?;
    Ok(Json(MessageResponse {
        message: "Recipe has been deleted.".to_string(),
    }))
}

/// Applies a partial edit to a recipe. Requires a token whose claims carry
/// the admin flag.
#[axum::debug_handler]
pub async fn edit_recipe_as_admin(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(recipe_id): Path<Uuid>,
    Json(patch): Json<RecipePatch>,
) -> Result<impl IntoResponse> {
    let recipe =
        recipe_service::edit_recipe_as_admin(&state.db, &claims, &recipe_id, patch).await?;
    Ok(Json(EditRecipeResponse {
        message: "Recipe has been updated".to_string(),
        recipe,
    }))
}

/// Returns whether a user holds the admin role.
///
/// Deliberately unauthenticated so client UIs can decide whether to show
/// admin controls; flagged for product review.
#[axum::debug_handler]
pub async fn admin_status(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let is_admin = recipe_service::admin_status(&state.db, &user_id).await?;
    Ok(Json(AdminStatusResponse { is_admin }))
}
