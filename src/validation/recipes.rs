use crate::error::{AppError, Result};
use crate::models::recipe::NewRecipe;

/// Validates a new recipe before it is persisted.
///
/// Enforces the required fields the store schema demands: a name, a
/// non-empty ingredient list, instructions, an image URL and a category.
///
/// # Arguments
///
/// * `recipe` - The recipe payload to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the recipe is valid.
pub fn validate_new_recipe(recipe: &NewRecipe) -> Result<()> {
    if recipe.name.trim().is_empty() {
        return Err(AppError::Validation("Recipe name is required".to_string()));
    }

    if recipe.ingredients.is_empty() || recipe.ingredients.iter().any(|i| i.trim().is_empty()) {
        return Err(AppError::Validation(
            "Recipe ingredients are required".to_string(),
        ));
    }

    if recipe.instructions.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipe instructions are required".to_string(),
        ));
    }

    if recipe.img_url.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipe image URL is required".to_string(),
        ));
    }

    if recipe.category.trim().is_empty() {
        return Err(AppError::Validation(
            "Recipe category is required".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample() -> NewRecipe {
        NewRecipe {
            name: "Shakshuka".to_string(),
            ingredients: vec!["eggs".to_string(), "tomatoes".to_string()],
            instructions: "Simmer the tomatoes, crack in the eggs.".to_string(),
            img_url: "https://example.com/shakshuka.jpg".to_string(),
            cooking_time: 25.0,
            category: "Breakfast".to_string(),
            user_owner: Uuid::new_v4(),
        }
    }

    #[test]
    fn accepts_complete_recipe() {
        assert!(validate_new_recipe(&sample()).is_ok());
    }

    #[test]
    fn rejects_missing_name() {
        let mut recipe = sample();
        recipe.name = "  ".to_string();
        assert!(validate_new_recipe(&recipe).is_err());
    }

    #[test]
    fn rejects_empty_ingredient_list() {
        let mut recipe = sample();
        recipe.ingredients.clear();
        assert!(validate_new_recipe(&recipe).is_err());
    }

    #[test]
    fn rejects_blank_ingredient_entry() {
        let mut recipe = sample();
        recipe.ingredients.push(String::new());
        assert!(validate_new_recipe(&recipe).is_err());
    }
}
