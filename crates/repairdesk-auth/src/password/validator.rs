//! Password policy enforcement for new passwords.

use repairdesk_core::config::AuthConfig;
use repairdesk_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length, in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Validates a password against the configured policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.trim().is_empty() {
            return Err(AppError::validation("Le mot de passe est obligatoire"));
        }
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Le mot de passe doit contenir au moins {} caractères",
                self.min_length
            )));
        }
        Ok(())
    }
}
