//! User directory service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use repairdesk_auth::PasswordValidator;
use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::traits::CredentialHasher;
use repairdesk_core::types::UserId;
use repairdesk_database::{MachineRepository, UserRepository};
use repairdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

const USER_NOT_FOUND: &str = "Utilisateur non trouvé";
const EMAIL_TAKEN: &str = "Email déjà utilisé";
const NUMERO_TAKEN: &str = "Numéro déjà utilisé";

/// Profile and initial secret of a new staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub nom: String,
    pub prenom: String,
    pub adresse: String,
    pub numero: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Replacement profile for an existing account.
///
/// The secret is rotated only when `password` holds a non-blank value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileUpdate {
    pub nom: String,
    pub prenom: String,
    pub adresse: String,
    pub numero: String,
    pub email: String,
    pub password: Option<String>,
}

/// Owns staff accounts and their role semantics.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Machine repository, consulted before deleting an account.
    machines: Arc<dyn MachineRepository>,
    /// Credential hasher.
    hasher: Arc<dyn CredentialHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
}

impl UserDirectory {
    /// Creates a new user directory.
    pub fn new(
        users: Arc<dyn UserRepository>,
        machines: Arc<dyn MachineRepository>,
        hasher: Arc<dyn CredentialHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            machines,
            hasher,
            validator,
        }
    }

    /// Registers a new account with `active = true`.
    pub async fn create_user(&self, profile: NewUserProfile) -> AppResult<User> {
        if self.users.find_by_email(&profile.email).await?.is_some() {
            return Err(AppError::duplicate_email(EMAIL_TAKEN));
        }
        if self.users.find_by_numero(&profile.numero).await?.is_some() {
            return Err(AppError::duplicate_contact(NUMERO_TAKEN));
        }

        self.validator.validate(&profile.password)?;
        let password_hash = self.hasher.hash(&profile.password)?;

        let user = self
            .users
            .create(&CreateUser {
                nom: profile.nom,
                prenom: profile.prenom,
                adresse: profile.adresse,
                numero: profile.numero,
                email: profile.email,
                password_hash,
                role: profile.role,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");
        Ok(user)
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))
    }

    /// Users whose id is in `ids`; unknown ids are skipped.
    pub async fn find_many(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        self.users.find_by_ids(ids).await
    }

    /// Lists every account.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Lists the accounts holding `role`.
    pub async fn list_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        self.users.find_by_role(role).await
    }

    /// Whether any account holds `role`.
    pub async fn has_role(&self, role: UserRole) -> AppResult<bool> {
        self.users.exists_by_role(role).await
    }

    /// Overwrites the profile fields. Role and active flag never change here.
    pub async fn update_user(&self, id: UserId, update: UserProfileUpdate) -> AppResult<User> {
        self.get_user(id).await?;

        if let Some(existing) = self.users.find_by_email(&update.email).await? {
            if existing.id != id {
                return Err(AppError::duplicate_email(EMAIL_TAKEN));
            }
        }
        if let Some(existing) = self.users.find_by_numero(&update.numero).await? {
            if existing.id != id {
                return Err(AppError::duplicate_contact(NUMERO_TAKEN));
            }
        }

        let password_hash = match update.password.as_deref() {
            Some(secret) if !secret.trim().is_empty() => {
                self.validator.validate(secret)?;
                Some(self.hasher.hash(secret)?)
            }
            _ => None,
        };
        let rotated = password_hash.is_some();

        let user = self
            .users
            .update(
                id,
                &UpdateUser {
                    nom: update.nom,
                    prenom: update.prenom,
                    adresse: update.adresse,
                    numero: update.numero,
                    email: update.email,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

        info!(user_id = %id, password_rotated = rotated, "User updated");
        Ok(user)
    }

    /// Deletes an account that no machine references.
    pub async fn delete_user(&self, id: UserId) -> AppResult<()> {
        self.get_user(id).await?;

        let references = self.machines.count_referencing_user(id).await?;
        if references > 0 {
            warn!(user_id = %id, references, "Refusing to delete referenced user");
            return Err(AppError::referential_conflict(format!(
                "Utilisateur référencé par {references} machine(s)"
            )));
        }

        if !self.users.delete(id).await? {
            return Err(AppError::not_found(USER_NOT_FOUND));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Returns the account when it is active and `secret` verifies.
    pub async fn verify_credentials(&self, email: &str, secret: &str) -> AppResult<User> {
        let rejected = || AppError::authentication("Identifiants invalides");

        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(rejected());
        };
        if !user.active {
            warn!(user_id = %user.id, "Sign-in attempt on inactive account");
            return Err(rejected());
        }
        if !self.hasher.verify(secret, &user.password_hash)? {
            return Err(rejected());
        }
        Ok(user)
    }

    /// Total number of accounts.
    pub async fn count(&self) -> AppResult<u64> {
        self.users.count().await
    }
}
