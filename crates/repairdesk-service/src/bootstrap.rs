//! Startup routine guaranteeing an administrator account.

use tracing::info;

use repairdesk_core::config::BootstrapConfig;
use repairdesk_core::result::AppResult;
use repairdesk_entity::user::UserRole;

use crate::user::{NewUserProfile, UserDirectory};

/// Creates the configured administrator when no ADMIN account exists.
///
/// Returns whether an account was created. Running it again is a no-op.
pub async fn ensure_default_admin(
    directory: &UserDirectory,
    config: &BootstrapConfig,
) -> AppResult<bool> {
    if !config.enabled {
        info!("Default admin bootstrap disabled");
        return Ok(false);
    }

    if directory.has_role(UserRole::Admin).await? {
        info!("Admin account already present, skipping bootstrap");
        return Ok(false);
    }

    let admin = directory
        .create_user(NewUserProfile {
            nom: config.nom.clone(),
            prenom: config.prenom.clone(),
            adresse: config.adresse.clone(),
            numero: config.numero.clone(),
            email: config.email.clone(),
            password: config.password.clone(),
            role: UserRole::Admin,
        })
        .await?;

    info!(user_id = %admin.id, email = %admin.email, "Default admin created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let fx = Fixture::new();
        let config = BootstrapConfig::default();

        assert!(ensure_default_admin(&fx.directory, &config).await.unwrap());
        assert!(!ensure_default_admin(&fx.directory, &config).await.unwrap());

        let admins = fx.directory.list_by_role(UserRole::Admin).await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@repair.com");
        assert!(
            fx.directory
                .verify_credentials("admin@repair.com", "admin123")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_bootstrap_disabled() {
        let fx = Fixture::new();
        let config = BootstrapConfig {
            enabled: false,
            ..BootstrapConfig::default()
        };
        assert!(!ensure_default_admin(&fx.directory, &config).await.unwrap());
        assert_eq!(fx.directory.count().await.unwrap(), 0);
    }
}
