use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The claims carried by a session token.
///
/// The token is stateless: validity is determined purely by its signature.
/// No expiry claim is embedded, so a token remains valid until the signing
/// secret changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The id of the authenticated user.
    pub id: Uuid,
    /// Whether the authenticated user holds the admin role.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
