//! PostgreSQL machine repository.
//!
//! Inserts and updates are single guarded statements: the referenced
//! client and staff rows, and their roles, are checked in the same
//! statement that writes the machine, and the foreign keys are declared
//! `ON DELETE RESTRICT`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_entity::machine::assignment::role_names;
use repairdesk_entity::machine::{
    Machine, MachineChanges, MachineStatus, NewMachine, REGISTRAR_ROLES, StatusCounts,
    TECHNICIAN_ROLES,
};

use super::MachineRepository;
use crate::error::{contains_pattern, read_error, write_error};

const INSERT_GUARDED: &str = r#"
INSERT INTO machines (
    marque, modele, numero_serie, defaut, photo_url, rendez_vous, statut,
    montant, paye, remarque_technicien, client_id, secretaire_id, technicien_id
)
SELECT $1, $2, $3, $4, $5, $6::DATE, $7::machine_status,
       $8::DOUBLE PRECISION, $9, $10, $11::BIGINT, $12::BIGINT, $13::BIGINT
WHERE EXISTS (SELECT 1 FROM clients WHERE id = $11::BIGINT)
  AND EXISTS (SELECT 1 FROM users WHERE id = $12::BIGINT AND role::TEXT = ANY($14))
  AND ($13::BIGINT IS NULL
       OR EXISTS (SELECT 1 FROM users WHERE id = $13::BIGINT AND role::TEXT = ANY($15)))
RETURNING *
"#;

const UPDATE_GUARDED: &str = r#"
UPDATE machines SET
    marque = $2,
    modele = $3,
    numero_serie = $4,
    defaut = $5,
    photo_url = $6,
    rendez_vous = $7::DATE,
    montant = $8::DOUBLE PRECISION,
    paye = $9,
    remarque_technicien = $10,
    statut = COALESCE($11::machine_status, statut),
    client_id = COALESCE($12::BIGINT, client_id),
    technicien_id = COALESCE($13::BIGINT, technicien_id),
    updated_at = NOW()
WHERE id = $1
  AND ($12::BIGINT IS NULL OR EXISTS (SELECT 1 FROM clients WHERE id = $12::BIGINT))
  AND ($13::BIGINT IS NULL
       OR EXISTS (SELECT 1 FROM users WHERE id = $13::BIGINT AND role::TEXT = ANY($14)))
RETURNING *
"#;

/// Repository for repair job persistence, queries, and counts.
#[derive(Debug, Clone)]
pub struct PgMachineRepository {
    pool: PgPool,
}

impl PgMachineRepository {
    /// Create a new machine repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: MachineId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM machines WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to check machine existence", e))
    }

    async fn count_where(&self, sql: &str, id: i64, context: &str) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error(context, e))?;
        Ok(total as u64)
    }
}

#[async_trait]
impl MachineRepository for PgMachineRepository {
    async fn find_by_id(&self, id: MachineId) -> AppResult<Option<Machine>> {
        sqlx::query_as::<_, Machine>("SELECT * FROM machines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| read_error("Failed to find machine by id", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>("SELECT * FROM machines ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list machines", e))
    }

    async fn find_by_status(&self, status: MachineStatus) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>("SELECT * FROM machines WHERE statut = $1 ORDER BY id")
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list machines by status", e))
    }

    async fn find_by_client(&self, client_id: ClientId) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>("SELECT * FROM machines WHERE client_id = $1 ORDER BY id")
            .bind(client_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| read_error("Failed to list machines by client", e))
    }

    async fn find_by_secretary(&self, user_id: UserId) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>(
            "SELECT * FROM machines WHERE secretaire_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to list machines by secretary", e))
    }

    async fn find_by_technician(&self, user_id: UserId) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>(
            "SELECT * FROM machines WHERE technicien_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to list machines by technician", e))
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Machine>> {
        sqlx::query_as::<_, Machine>(
            r#"SELECT m.* FROM machines m
               JOIN clients c ON c.id = m.client_id
               WHERE m.marque ILIKE $1
                  OR m.modele ILIKE $1
                  OR c.nom ILIKE $1
                  OR c.prenom ILIKE $1
               ORDER BY m.id"#,
        )
        .bind(contains_pattern(keyword))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error("Failed to search machines", e))
    }

    async fn count_by_status(&self, status: MachineStatus) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM machines WHERE statut = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count machines by status", e))?;
        Ok(total as u64)
    }

    async fn status_counts(&self) -> AppResult<StatusCounts> {
        let rows: Vec<(MachineStatus, i64)> =
            sqlx::query_as("SELECT statut, COUNT(*) FROM machines GROUP BY statut")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| read_error("Failed to count machines per status", e))?;

        let mut counts = StatusCounts::default();
        for (status, n) in rows {
            counts.add(status, n as u64);
        }
        Ok(counts)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM machines")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| read_error("Failed to count machines", e))?;
        Ok(total as u64)
    }

    async fn count_referencing_client(&self, client_id: ClientId) -> AppResult<u64> {
        self.count_where(
            "SELECT COUNT(*) FROM machines WHERE client_id = $1",
            client_id.get(),
            "Failed to count machines for client",
        )
        .await
    }

    async fn count_referencing_user(&self, user_id: UserId) -> AppResult<u64> {
        self.count_where(
            "SELECT COUNT(*) FROM machines WHERE secretaire_id = $1 OR technicien_id = $1",
            user_id.get(),
            "Failed to count machines for user",
        )
        .await
    }

    async fn create(&self, input: &NewMachine) -> AppResult<Machine> {
        let created = sqlx::query_as::<_, Machine>(INSERT_GUARDED)
            .bind(&input.marque)
            .bind(&input.modele)
            .bind(input.numero_serie.as_deref())
            .bind(&input.defaut)
            .bind(input.photo_url.as_deref())
            .bind(input.rendez_vous)
            .bind(input.statut)
            .bind(input.montant)
            .bind(input.paye)
            .bind(input.remarque_technicien.as_deref())
            .bind(input.client_id)
            .bind(input.secretaire_id)
            .bind(input.technicien_id)
            .bind(role_names(REGISTRAR_ROLES))
            .bind(role_names(TECHNICIAN_ROLES))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("Failed to create machine", e))?;

        created.ok_or_else(|| {
            warn!(
                client_id = %input.client_id,
                secretaire_id = %input.secretaire_id,
                "Machine insert rejected: a reference changed during the write"
            );
            AppError::referential_conflict(
                "Client, secretary, or technician no longer eligible for this machine",
            )
        })
    }

    async fn update(&self, id: MachineId, changes: &MachineChanges) -> AppResult<Option<Machine>> {
        let updated = sqlx::query_as::<_, Machine>(UPDATE_GUARDED)
            .bind(id)
            .bind(&changes.marque)
            .bind(&changes.modele)
            .bind(changes.numero_serie.as_deref())
            .bind(&changes.defaut)
            .bind(changes.photo_url.as_deref())
            .bind(changes.rendez_vous)
            .bind(changes.montant)
            .bind(changes.paye)
            .bind(changes.remarque_technicien.as_deref())
            .bind(changes.statut)
            .bind(changes.client_id)
            .bind(changes.technicien_id)
            .bind(role_names(TECHNICIAN_ROLES))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error("Failed to update machine", e))?;

        match updated {
            Some(machine) => Ok(Some(machine)),
            None if self.exists(id).await? => {
                warn!(machine_id = %id, "Machine update rejected: a reference changed during the write");
                Err(AppError::referential_conflict(
                    "Client or technician no longer eligible for this machine",
                ))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: MachineId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM machines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to delete machine", e))?;
        Ok(result.rows_affected() > 0)
    }
}
