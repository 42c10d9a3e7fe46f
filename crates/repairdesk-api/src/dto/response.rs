//! Response DTOs.

use serde::{Deserialize, Serialize};

use repairdesk_core::types::UserId;
use repairdesk_entity::user::{User, UserRole};

/// Confirmation body for deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Builds a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when the store answered.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Storage backend in use.
    pub backend: String,
}

/// Identity of a successfully signed-in account. No token is issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: UserId,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: UserRole,
    pub message: String,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nom: user.nom,
            prenom: user.prenom,
            email: user.email,
            role: user.role,
            message: "Connexion réussie".to_string(),
        }
    }
}
