//! Default administrator settings.

use serde::{Deserialize, Serialize};

/// Profile of the administrator created when no ADMIN account exists.
///
/// Change `password` before exposing a fresh installation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Whether the startup check runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_nom")]
    pub nom: String,
    #[serde(default = "default_prenom")]
    pub prenom: String,
    #[serde(default = "default_adresse")]
    pub adresse: String,
    #[serde(default = "default_numero")]
    pub numero: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nom: default_nom(),
            prenom: default_prenom(),
            adresse: default_adresse(),
            numero: default_numero(),
            email: default_email(),
            password: default_password(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_nom() -> String {
    "Administrateur".to_string()
}

fn default_prenom() -> String {
    "Principal".to_string()
}

fn default_adresse() -> String {
    "123 Rue de la Réparation, 75001 Paris".to_string()
}

fn default_numero() -> String {
    "0612345678".to_string()
}

fn default_email() -> String {
    "admin@repair.com".to_string()
}

fn default_password() -> String {
    "admin123".to_string()
}
