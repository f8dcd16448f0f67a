use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::claims::Claims;
use crate::models::recipe::{NewRecipe, Recipe, RecipePatch};
use crate::repositories::recipe as recipe_repo;
use crate::repositories::user as user_repo;
use crate::validation::recipes::validate_new_recipe;

/// Returns the claims' user if they carry the admin flag, failing otherwise.
fn ensure_admin(claims: &Claims) -> Result<()> {
    if !claims.is_admin {
        return Err(AppError::Forbidden("User is not admin".to_string()));
    }
    Ok(())
}

/// Removes every occurrence of `recipe_id` from a saved-recipes sequence.
///
/// Comparison is by value, so duplicate saves of the same recipe are all
/// removed at once. Removing an id that is not present is a no-op.
fn without_recipe(saved: &[Uuid], recipe_id: &Uuid) -> Vec<Uuid> {
    saved.iter().filter(|id| *id != recipe_id).copied().collect()
}

/// Creates a new recipe after validating its required fields.
pub async fn create_recipe(db: &Pool, recipe: NewRecipe) -> Result<Recipe> {
    validate_new_recipe(&recipe)?;
    let created = recipe_repo::create_recipe(db, Uuid::new_v4(), &recipe).await?;
    tracing::info!("✅ Recipe created: {} ({})", created.name, created.id);
    Ok(created)
}

/// Returns every recipe.
pub async fn list_recipes(db: &Pool) -> Result<Vec<Recipe>> {
    recipe_repo::find_all(db).await
}

/// Searches recipes by a case-insensitive name fragment.
///
/// An empty or absent fragment returns the unfiltered set.
pub async fn search_recipes(db: &Pool, fragment: Option<&str>) -> Result<Vec<Recipe>> {
    match fragment {
        Some(fragment) if !fragment.is_empty() => recipe_repo::search_by_name(db, fragment).await,
        _ => recipe_repo::find_all(db).await,
    }
}

/// Fetches a single recipe by id.
pub async fn get_recipe(db: &Pool, recipe_id: &Uuid) -> Result<Recipe> {
    recipe_repo::find_by_id(db, recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found.".to_string()))
}

/// Returns the username of the given user.
pub async fn get_username(db: &Pool, user_id: &Uuid) -> Result<String> {
    let user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(user.username)
}

/// Bookmarks a recipe for a user and returns the updated id sequence.
///
/// The recipe must exist before the user's sequence is touched: a missing
/// recipe fails the call without mutating anything, so a dangling reference
/// is never appended.
///
/// Note: this is a read-modify-write of the whole sequence. Two concurrent
/// saves for the same user can lose one of the two updates.
pub async fn add_saved(db: &Pool, recipe_id: &Uuid, user_id: &Uuid) -> Result<Vec<Uuid>> {
    let recipe = recipe_repo::find_by_id(db, recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found.".to_string()))?;

    let mut user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    user.saved_recipes.push(recipe.id);
    user_repo::update_saved_recipes(db, &user.id, &user.saved_recipes).await?;

    tracing::info!("✅ User {} saved recipe {}", user.id, recipe.id);
    Ok(user.saved_recipes)
}

/// Removes a recipe from a user's saved sequence.
///
/// Both entities must exist. Every occurrence of the id is filtered out;
/// removing an id that was never saved succeeds and changes nothing.
pub async fn remove_saved(db: &Pool, user_id: &Uuid, recipe_id: &Uuid) -> Result<()> {
    let recipe = recipe_repo::find_by_id(db, recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found.".to_string()))?;

    let user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    let remaining = without_recipe(&user.saved_recipes, &recipe.id);
    user_repo::update_saved_recipes(db, &user.id, &remaining).await?;

    tracing::info!("✅ User {} removed saved recipe {}", user.id, recipe.id);
    Ok(())
}

/// Returns the raw saved-recipe id sequence for a user.
pub async fn saved_recipe_ids(db: &Pool, user_id: &Uuid) -> Result<Vec<Uuid>> {
    let user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(user.saved_recipes)
}

/// Resolves a user's saved-recipe ids against the recipe store.
///
/// Ids that no longer resolve are dropped by the set-membership query
/// rather than reported individually.
pub async fn saved_recipes(db: &Pool, user_id: &Uuid) -> Result<Vec<Recipe>> {
    let user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    recipe_repo::find_by_ids(db, &user.saved_recipes).await
}

/// Returns whether the given user holds the admin role.
pub async fn admin_status(db: &Pool, user_id: &Uuid) -> Result<bool> {
    let user = user_repo::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    Ok(user.is_admin)
}

/// Deletes a recipe on behalf of an admin caller.
pub async fn delete_recipe_as_admin(db: &Pool, claims: &Claims, recipe_id: &Uuid) -> Result<()> {
    ensure_admin(claims)?;

    if recipe_repo::find_by_id(db, recipe_id).await?.is_none() {
        return Err(AppError::NotFound("Recipe not found.".to_string()));
    }

    recipe_repo::delete_recipe(db, recipe_id).await?;
    tracing::info!("✅ Admin {} deleted recipe {}", claims.id, recipe_id);
    Ok(())
}

/// Applies a partial edit to a recipe on behalf of an admin caller.
///
/// The patch is applied as-is; required-field enforcement applies at
/// creation only, not on update.
pub async fn edit_recipe_as_admin(
    db: &Pool,
    claims: &Claims,
    recipe_id: &Uuid,
    patch: RecipePatch,
) -> Result<Recipe> {
    ensure_admin(claims)?;

    let updated = recipe_repo::update_recipe(db, recipe_id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Updated recipe not found.".to_string()))?;

    tracing::info!("✅ Admin {} updated recipe {}", claims.id, recipe_id);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(is_admin: bool) -> Claims {
        Claims {
            id: Uuid::new_v4(),
            is_admin,
        }
    }

    #[test]
    fn ensure_admin_passes_for_admin_claims() {
        assert!(ensure_admin(&claims(true)).is_ok());
    }

    #[test]
    fn ensure_admin_fails_with_forbidden_for_non_admin_claims() {
        match ensure_admin(&claims(false)) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "User is not admin"),
            other => panic!("expected forbidden, got {:?}", other),
        }
    }

    #[test]
    fn without_recipe_removes_every_occurrence() {
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let saved = vec![target, other, target];

        assert_eq!(without_recipe(&saved, &target), vec![other]);
    }

    #[test]
    fn without_recipe_preserves_order_of_the_rest() {
        let target = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let saved = vec![first, target, second];

        assert_eq!(without_recipe(&saved, &target), vec![first, second]);
    }

    #[test]
    fn without_recipe_is_idempotent() {
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let saved = vec![other, target];

        let once = without_recipe(&saved, &target);
        let twice = without_recipe(&once, &target);
        assert_eq!(once, twice);
    }

    #[test]
    fn without_recipe_on_absent_id_is_a_no_op() {
        let saved = vec![Uuid::new_v4(), Uuid::new_v4()];
        assert_eq!(without_recipe(&saved, &Uuid::new_v4()), saved);
    }
}
