use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::user::User,
};

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id").map_err(|_| AppError::Internal("users row missing id".to_string()))?,
        username: row.try_get("username").map_err(|_| AppError::Internal("users row missing username".to_string()))?,
        password: row.try_get("password").map_err(|_| AppError::Internal("users row missing password".to_string()))?,
        is_admin: row.try_get("is_admin").map_err(|_| AppError::Internal("users row missing is_admin".to_string()))?,
        saved_recipes: row.try_get("saved_recipes").map_err(|_| AppError::Internal("users row missing saved_recipes".to_string()))?,
    })
}

/// Creates a new user.
pub async fn create_user(
    pool: &Pool,
    id: Uuid,
    username: &str,
    password_hash: &str,
) -> Result<User> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO users (id, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, password, is_admin, saved_recipes
            "#,
            &[&id, &username, &password_hash],
        )
        .await?;
    row_to_user(&row)
}

/// Finds a user by their username.
pub async fn find_by_username(pool: &Pool, username: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, username, password, is_admin, saved_recipes
            FROM users
            WHERE username = $1
            "#,
            &[&username],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: &Uuid) -> Result<Option<User>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, username, password, is_admin, saved_recipes
            FROM users
            WHERE id = $1
            "#,
            &[user_id],
        )
        .await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Replaces a user's saved-recipe sequence.
pub async fn update_saved_recipes(
    pool: &Pool,
    user_id: &Uuid,
    saved_recipes: &[Uuid],
) -> Result<()> {
    let client = pool.get().await?;
    let saved: Vec<Uuid> = saved_recipes.to_vec();
    client
        .execute(
            r#"
            UPDATE users
            SET saved_recipes = $1
            WHERE id = $2
            "#,
            &[&saved, user_id],
        )
        .await?;
    Ok(())
}

/// Deletes a user, returning how many rows were removed.
pub async fn delete_user(pool: &Pool, user_id: &Uuid) -> Result<u64> {
    let client = pool.get().await?;
    let deleted = client
        .execute(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
            &[user_id],
        )
        .await?;
    Ok(deleted)
}
