use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a recipe.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// The unique identifier for the recipe.
    pub id: Uuid,
    /// The recipe's display name.
    pub name: String,
    /// The list of ingredients, in order.
    pub ingredients: Vec<String>,
    /// The preparation instructions.
    pub instructions: String,
    /// A URL pointing at an image of the finished dish.
    pub img_url: String,
    /// The cooking time in minutes.
    pub cooking_time: f64,
    /// The recipe's category.
    pub category: String,
    /// The timestamp when the recipe was created.
    pub created_at: DateTime<Utc>,
    /// The user who created the recipe.
    pub user_owner: Uuid,
}

/// The payload for creating a new recipe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub img_url: String,
    pub cooking_time: f64,
    pub category: String,
    pub user_owner: Uuid,
}

/// A partial-field update applied to an existing recipe.
///
/// Absent fields are left untouched. Required-field enforcement applies at
/// creation only, not on update.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    pub name: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub img_url: Option<String>,
    pub cooking_time: Option<f64>,
    pub category: Option<String>,
}
