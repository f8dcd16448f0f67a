use uuid::Uuid;

/// Represents a user account.
///
/// Never serialized directly: responses expose at most the username, the
/// admin flag, or the saved-recipe ids, never the password hash.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's username. Unique at the store level.
    pub username: String,
    /// The user's hashed password.
    pub password: String,
    /// Whether the user may edit or delete any recipe.
    pub is_admin: bool,
    /// The recipes the user has bookmarked, in save order.
    /// Duplicates are permitted.
    pub saved_recipes: Vec<Uuid>,
}
