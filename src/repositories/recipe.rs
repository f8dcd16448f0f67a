use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::recipe::{NewRecipe, Recipe, RecipePatch},
};

/// A helper function to map a `tokio_postgres::Row` to a `Recipe`.
fn row_to_recipe(row: &Row) -> Result<Recipe> {
    Ok(Recipe {
        id: row.try_get("id").map_err(|_| AppError::Internal("recipes row missing id".to_string()))?,
        name: row.try_get("name").map_err(|_| AppError::Internal("recipes row missing name".to_string()))?,
        ingredients: row.try_get("ingredients").map_err(|_| AppError::Internal("recipes row missing ingredients".to_string()))?,
        instructions: row.try_get("instructions").map_err(|_| AppError::Internal("recipes row missing instructions".to_string()))?,
        img_url: row.try_get("img_url").map_err(|_| AppError::Internal("recipes row missing img_url".to_string()))?,
        cooking_time: row.try_get("cooking_time").map_err(|_| AppError::Internal("recipes row missing cooking_time".to_string()))?,
        category: row.try_get("category").map_err(|_| AppError::Internal("recipes row missing category".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::Internal("recipes row missing created_at".to_string()))?,
        user_owner: row.try_get("user_owner").map_err(|_| AppError::Internal("recipes row missing user_owner".to_string()))?,
    })
}

/// Creates a new recipe.
pub async fn create_recipe(pool: &Pool, id: Uuid, recipe: &NewRecipe) -> Result<Recipe> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO recipes
                (id, name, ingredients, instructions, img_url, cooking_time, category, user_owner)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, ingredients, instructions, img_url, cooking_time, category,
                      created_at, user_owner
            "#,
            &[
                &id,
                &recipe.name,
                &recipe.ingredients,
                &recipe.instructions,
                &recipe.img_url,
                &recipe.cooking_time,
                &recipe.category,
                &recipe.user_owner,
            ],
        )
        .await?;
    row_to_recipe(&row)
}

/// Returns every recipe, oldest first.
pub async fn find_all(pool: &Pool) -> Result<Vec<Recipe>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, ingredients, instructions, img_url, cooking_time, category,
                   created_at, user_owner
            FROM recipes
            ORDER BY created_at
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_recipe).collect()
}

/// Finds a recipe by its ID.
pub async fn find_by_id(pool: &Pool, recipe_id: &Uuid) -> Result<Option<Recipe>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, name, ingredients, instructions, img_url, cooking_time, category,
                   created_at, user_owner
            FROM recipes
            WHERE id = $1
            "#,
            &[recipe_id],
        )
        .await?;
    row.map(|r| row_to_recipe(&r)).transpose()
}

/// Resolves a set of recipe ids.
///
/// Ids that no longer resolve are silently dropped: this is a set-membership
/// query, not a per-id lookup.
pub async fn find_by_ids(pool: &Pool, recipe_ids: &[Uuid]) -> Result<Vec<Recipe>> {
    let client = pool.get().await?;
    let ids: Vec<Uuid> = recipe_ids.to_vec();
    let rows = client
        .query(
            r#"
            SELECT id, name, ingredients, instructions, img_url, cooking_time, category,
                   created_at, user_owner
            FROM recipes
            WHERE id = ANY($1)
            "#,
            &[&ids],
        )
        .await?;
    rows.iter().map(row_to_recipe).collect()
}

/// Finds recipes whose name contains the given fragment, case-insensitively.
pub async fn search_by_name(pool: &Pool, fragment: &str) -> Result<Vec<Recipe>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, ingredients, instructions, img_url, cooking_time, category,
                   created_at, user_owner
            FROM recipes
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY created_at
            "#,
            &[&fragment],
        )
        .await?;
    rows.iter().map(row_to_recipe).collect()
}

/// Applies a partial update to a recipe and returns the updated row.
///
/// Returns `None` when no recipe with that id exists.
pub async fn update_recipe(
    pool: &Pool,
    recipe_id: &Uuid,
    patch: &RecipePatch,
) -> Result<Option<Recipe>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE recipes
            SET
                name = COALESCE($2, name),
                ingredients = COALESCE($3, ingredients),
                instructions = COALESCE($4, instructions),
                img_url = COALESCE($5, img_url),
                cooking_time = COALESCE($6, cooking_time),
                category = COALESCE($7, category)
            WHERE id = $1
            RETURNING id, name, ingredients, instructions, img_url, cooking_time, category,
                      created_at, user_owner
            "#,
            &[
                recipe_id,
                &patch.name,
                &patch.ingredients,
                &patch.instructions,
                &patch.img_url,
                &patch.cooking_time,
                &patch.category,
            ],
        )
        .await?;
    row.map(|r| row_to_recipe(&r)).transpose()
}

/// Deletes a recipe, returning how many rows were removed.
pub async fn delete_recipe(pool: &Pool, recipe_id: &Uuid) -> Result<u64> {
    let client = pool.get().await?;
    let deleted = client
        .execute(
            r#"
            DELETE FROM recipes
            WHERE id = $1
            "#,
            &[recipe_id],
        )
        .await?;
    Ok(deleted)
}
