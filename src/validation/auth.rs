use crate::error::{AppError, Result};

/// Validates a username.
///
/// # Arguments
///
/// * `username` - The username to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the username is valid.
pub fn validate_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(AppError::Validation(
            "Username cannot be empty".to_string(),
        ));
    }

    if username.len() > 255 {
        return Err(AppError::Validation(
            "Username must be at most 255 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a candidate password against the acceptance policy.
///
/// A password is accepted only if it contains at least one digit, one
/// lowercase letter and one uppercase letter, and is at least 5 characters
/// long. This runs before hashing; a rejected password never reaches the
/// hasher.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is acceptable.
pub fn validate_password(password: &str) -> Result<()> {
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());

    if !has_digit || !has_lower || !has_upper || password.chars().count() < 5 {
        return Err(AppError::Validation(
            "Password must contain at least one digit, one lowercase, one uppercase letter, and be at least 5 characters long.".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_password_meeting_every_rule() {
        assert!(validate_password("Passw0rd").is_ok());
        assert!(validate_password("aB1cd").is_ok());
    }

    #[test]
    fn rejects_password_without_digit() {
        assert!(validate_password("Password").is_err());
    }

    #[test]
    fn rejects_password_without_lowercase() {
        assert!(validate_password("PASSW0RD").is_err());
    }

    #[test]
    fn rejects_password_without_uppercase() {
        assert!(validate_password("passw0rd").is_err());
    }

    #[test]
    fn rejects_password_shorter_than_five_characters() {
        assert!(validate_password("aB1c").is_err());
    }

    #[test]
    fn rejection_carries_the_policy_message() {
        let err = validate_password("short").unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(
                msg,
                "Password must contain at least one digit, one lowercase, one uppercase letter, and be at least 5 characters long."
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_empty_username() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("alice").is_ok());
    }
}
