use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{AppError, Result};
use crate::models::claims::Claims;

/// Issues a signed session token for the given claims.
///
/// The token is self-contained and carries no expiry claim: it stays valid
/// for as long as the signing secret does.
///
/// # Arguments
///
/// * `secret` - The process-wide signing secret.
/// * `claims` - The identity and role to embed.
///
/// # Returns
///
/// A `Result` containing the encoded token string.
pub fn issue(secret: &str, claims: &Claims) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// Only the signature is checked; expiry validation is disabled because the
/// tokens carry no `exp` claim.
///
/// # Arguments
///
/// * `secret` - The process-wide signing secret.
/// * `token` - The raw token string from the `authorization` header.
///
/// # Returns
///
/// A `Result` containing the decoded `Claims`, or a `Forbidden` error for a
/// forged or malformed token.
pub fn verify(secret: &str, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Forbidden("Invalid token.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const SECRET: &str = "unit-test-secret-at-least-32-chars!!";

    #[test]
    fn issued_token_round_trips() {
        let claims = Claims {
            id: Uuid::new_v4(),
            is_admin: true,
        };

        let token = issue(SECRET, &claims).unwrap();
        let decoded = verify(SECRET, &token).unwrap();

        assert_eq!(decoded.id, claims.id);
        assert!(decoded.is_admin);
    }

    #[test]
    fn admin_flag_survives_the_round_trip_when_false() {
        let claims = Claims {
            id: Uuid::new_v4(),
            is_admin: false,
        };

        let token = issue(SECRET, &claims).unwrap();
        assert!(!verify(SECRET, &token).unwrap().is_admin);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let claims = Claims {
            id: Uuid::new_v4(),
            is_admin: false,
        };

        let token = issue("some-other-secret-also-32-chars!!!!!", &claims).unwrap();
        assert!(verify(SECRET, &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify(SECRET, "not-a-token").is_err());
        assert!(verify(SECRET, "").is_err());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let claims = Claims {
            id: Uuid::new_v4(),
            is_admin: false,
        };

        let token = issue(SECRET, &claims).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        // Swap the payload for one claiming admin, keeping the old signature.
        let forged_payload = "eyJpZCI6IjAwMDAwMDAwLTAwMDAtMDAwMC0wMDAwLTAwMDAwMDAwMDAwMCIsImlzQWRtaW4iOnRydWV9";
        parts[1] = forged_payload;
        let forged = parts.join(".");

        assert!(verify(SECRET, &forged).is_err());
    }
}
