//! PostgreSQL user repository.

use async_trait::async_trait;
use sqlx::PgPool;

use repairdesk_core::result::AppResult;
use repairdesk_core::types::UserId;
use repairdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::UserRepository;
use crate::error::{read_error, write_error};

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find user by id", e))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1) ORDER BY id")
            .bind(raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find users by ids", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find user by email", e))
    }

    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE numero = $1")
            .bind(numero)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find user by numero", e))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list users", e))
    }

    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = $1 ORDER BY id")
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list users by role", e))
    }

    async fn exists_by_role(&self, role: UserRole) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE role = $1)")
            .bind(role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to check users by role", e))
    }

    async fn create(&self, input: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (nom, prenom, adresse, numero, email, password_hash, role)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.adresse)
        .bind(&input.numero)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create user", e))
    }

    async fn update(&self, id: UserId, input: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"UPDATE users SET
                nom = $2,
                prenom = $3,
                adresse = $4,
                numero = $5,
                email = $6,
                password_hash = COALESCE($7, password_hash),
                updated_at = NOW()
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.adresse)
        .bind(&input.numero)
        .bind(&input.email)
        .bind(input.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update user", e))
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count users", e))?;
        Ok(total as u64)
    }
}
