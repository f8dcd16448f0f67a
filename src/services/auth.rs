use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::repositories::user as user_repo;
use crate::validation::auth::{validate_password, validate_username};

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 4;

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a hash.
///
/// Mismatched input is not an error; only a malformed hash is.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {}", e)))?;
    let argon2 = Argon2::default();
    let result = argon2
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    Ok(result)
}

/// Registers a new user.
///
/// The username must be unused and the password must pass the acceptance
/// policy. The created account holds no admin rights and starts with an
/// empty saved-recipes sequence. No token is issued here; login is a
/// separate step.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `username` - The requested username.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register_user(db: &Pool, username: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Registering user: {}", username);
    validate_username(username)?;

    if user_repo::find_by_username(db, username).await?.is_some() {
        return Err(AppError::Validation("User already exists!".to_string()));
    }

    validate_password(password)?;

    let hashed_password = hash_password(password)?;
    let user = user_repo::create_user(db, Uuid::new_v4(), username, &hashed_password).await?;

    tracing::info!("✅ User registered with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by username and password.
///
/// Unknown usernames and wrong passwords produce the identical error, so a
/// caller cannot tell which of the two was wrong.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `username` - The user's username.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the authenticated `User`.
pub async fn authenticate_user(db: &Pool, username: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", username);

    let user = user_repo::find_by_username(db, username)
        .await?
        .ok_or_else(|| AppError::Validation("Username or Password is incorrect!".to_string()))?;

    if !verify_password(password, &user.password)? {
        return Err(AppError::Validation(
            "Username or Password is incorrect!".to_string(),
        ));
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}

/// Deletes the account identified by the caller's verified claims.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `user_id` - The id taken from the caller's token claims.
///
/// # Returns
///
/// A `Result<()>`.
pub async fn delete_account(db: &Pool, user_id: &Uuid) -> Result<()> {
    if user_repo::find_by_id(db, user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found.".to_string()));
    }

    user_repo::delete_user(db, user_id).await?;
    tracing::info!("✅ User deleted: {}", user_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_original_password() {
        let hash = hash_password("Passw0rd").unwrap();
        assert!(verify_password("Passw0rd", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_a_different_password_without_erroring() {
        let hash = hash_password("Passw0rd").unwrap();
        assert!(!verify_password("Passw1rd", &hash).unwrap());
    }

    #[test]
    fn hash_is_salted_so_equal_passwords_produce_distinct_hashes() {
        let first = hash_password("Passw0rd").unwrap();
        let second = hash_password("Passw0rd").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn hash_never_contains_the_plaintext() {
        let hash = hash_password("Passw0rd").unwrap();
        assert!(!hash.contains("Passw0rd"));
    }

    #[test]
    fn verify_errors_on_a_malformed_hash() {
        assert!(verify_password("Passw0rd", "not-a-phc-string").is_err());
    }
}
