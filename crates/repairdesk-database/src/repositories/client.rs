//! PostgreSQL client repository.

use async_trait::async_trait;
use sqlx::PgPool;

use repairdesk_core::result::AppResult;
use repairdesk_core::types::ClientId;
use repairdesk_entity::client::{Client, ClientProfile};

use super::ClientRepository;
use crate::error::{contains_pattern, read_error, write_error};

/// Repository for client CRUD and search.
#[derive(Debug, Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new client repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find client by id", e))
    }

    async fn find_by_ids(&self, ids: &[ClientId]) -> AppResult<Vec<Client>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ANY($1) ORDER BY id")
            .bind(raw)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find clients by ids", e))
    }

    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE numero = $1")
            .bind(numero)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find client by numero", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list clients", e))
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE nom ILIKE $1 OR prenom ILIKE $1 ORDER BY id",
        )
        .bind(contains_pattern(keyword))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to search clients", e))
    }

    async fn create(&self, input: &ClientProfile) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"INSERT INTO clients (nom, prenom, adresse, numero, email, autres)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.adresse)
        .bind(&input.numero)
        .bind(input.email.as_deref())
        .bind(input.autres.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("Failed to create client", e))
    }

    async fn update(&self, id: ClientId, input: &ClientProfile) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>(
            r#"UPDATE clients SET
                nom = $2,
                prenom = $3,
                adresse = $4,
                numero = $5,
                email = $6,
                autres = $7
               WHERE id = $1
               RETURNING *"#,
        )
        .bind(id)
        .bind(&input.nom)
        .bind(&input.prenom)
        .bind(&input.adresse)
        .bind(&input.numero)
        .bind(input.email.as_deref())
        .bind(input.autres.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("Failed to update client", e))
    }

    async fn delete(&self, id: ClientId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to delete client", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count clients", e))?;
        Ok(total as u64)
    }
}
