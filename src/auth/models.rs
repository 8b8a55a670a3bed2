use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;

/// Claims of a token issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,                // Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,       // Display name
    pub exp: usize,                 // Expiration time
    pub iat: usize,                 // Issued at
}

/// Authenticated caller, attached to request extensions by the middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl UserSession {
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        Ok(Self {
            user_id: Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidSubject)?,
            email: claims.email.clone(),
            display_name: claims.name.clone(),
        })
    }
}
