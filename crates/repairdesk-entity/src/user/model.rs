//! Staff account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use repairdesk_core::types::UserId;

use super::role::UserRole;

/// A staff account: administrator, secretary, or technician.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Family name.
    pub nom: String,
    /// Given name.
    pub prenom: String,
    /// Postal address.
    pub adresse: String,
    /// Contact phone number, unique across users.
    pub numero: String,
    /// Login email, unique across users.
    pub email: String,
    /// Credential hash produced by the configured hasher.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Whether the account may sign in.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Display name in "Prénom Nom" order.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

/// Data required to insert a new user. The secret is already hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub nom: String,
    pub prenom: String,
    pub adresse: String,
    pub numero: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Replacement profile for an existing user.
///
/// `password_hash` is `None` when the stored credential must be kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    pub nom: String,
    pub prenom: String,
    pub adresse: String,
    pub numero: String,
    pub email: String,
    pub password_hash: Option<String>,
}
