use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::UserId;
use repairdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::Tables;
use crate::error::{DUPLICATE_CONTACT_MESSAGE, DUPLICATE_EMAIL_MESSAGE};
use crate::repositories::UserRepository;

/// In-memory user repository.
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryUserRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

/// Enforces the unique email and numero columns, ignoring `except`.
fn check_unique(
    tables: &Tables,
    email: &str,
    numero: &str,
    except: Option<UserId>,
) -> AppResult<()> {
    let others = || tables.users.values().filter(move |u| Some(u.id) != except);
    if others().any(|u| u.email == email) {
        return Err(AppError::duplicate_email(DUPLICATE_EMAIL_MESSAGE));
    }
    if others().any(|u| u.numero == numero) {
        return Err(AppError::duplicate_contact(DUPLICATE_CONTACT_MESSAGE));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.numero == numero).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn exists_by_role(&self, role: UserRole) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.role == role))
    }

    async fn create(&self, input: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        check_unique(&tables, &input.email, &input.numero, None)?;

        let now = Utc::now();
        let user = User {
            id: tables.next_user_id(),
            nom: input.nom.clone(),
            prenom: input.prenom.clone(),
            adresse: input.adresse.clone(),
            numero: input.numero.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, input: &UpdateUser) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        check_unique(&tables, &input.email, &input.numero, Some(id))?;

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.nom = input.nom.clone();
        user.prenom = input.prenom.clone();
        user.adresse = input.adresse.clone();
        user.numero = input.numero.clone();
        user.email = input.email.clone();
        if let Some(hash) = &input.password_hash {
            user.password_hash = hash.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.user_in_use(id) {
            return Err(AppError::referential_conflict(
                "Failed to delete user: the record is still referenced by a machine",
            ));
        }
        Ok(tables.users.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}
