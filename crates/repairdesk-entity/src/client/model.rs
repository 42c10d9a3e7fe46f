//! Client entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use repairdesk_core::types::ClientId;

/// A customer who brings machines in for repair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Family name.
    pub nom: String,
    /// Given name.
    pub prenom: String,
    /// Postal address.
    pub adresse: String,
    /// Contact phone number, unique across clients.
    pub numero: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Free-text notes.
    pub autres: Option<String>,
    /// When the client was registered.
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Case-insensitive substring match on the family or given name.
    pub fn name_contains(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.nom.to_lowercase().contains(&needle) || self.prenom.to_lowercase().contains(&needle)
    }
}

/// Profile fields used both to register a client and to replace an
/// existing client's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    pub nom: String,
    pub prenom: String,
    pub adresse: String,
    pub numero: String,
    pub email: Option<String>,
    pub autres: Option<String>,
}
