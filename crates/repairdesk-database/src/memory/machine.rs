use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_entity::machine::{
    Machine, MachineChanges, MachineStatus, NewMachine, REGISTRAR_ROLES, StatusCounts,
    TECHNICIAN_ROLES,
};
use repairdesk_entity::user::UserRole;

use super::Tables;
use crate::repositories::MachineRepository;

/// In-memory machine repository.
#[derive(Debug, Clone)]
pub struct MemoryMachineRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryMachineRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Machine>
    where
        F: Fn(&Machine) -> bool,
    {
        let tables = self.tables.read().await;
        tables.machines.values().filter(|m| keep(m)).cloned().collect()
    }

    async fn count_matching<F>(&self, keep: F) -> u64
    where
        F: Fn(&Machine) -> bool,
    {
        let tables = self.tables.read().await;
        tables.machines.values().filter(|m| keep(m)).count() as u64
    }
}

fn has_role(tables: &Tables, id: UserId, roles: &[UserRole]) -> bool {
    tables
        .users
        .get(&id)
        .is_some_and(|u| u.role.is_one_of(roles))
}

#[async_trait]
impl MachineRepository for MemoryMachineRepository {
    async fn find_by_id(&self, id: MachineId) -> AppResult<Option<Machine>> {
        Ok(self.tables.read().await.machines.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Machine>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_status(&self, status: MachineStatus) -> AppResult<Vec<Machine>> {
        Ok(self.filtered(|m| m.statut == status).await)
    }

    async fn find_by_client(&self, client_id: ClientId) -> AppResult<Vec<Machine>> {
        Ok(self.filtered(|m| m.client_id == client_id).await)
    }

    async fn find_by_secretary(&self, user_id: UserId) -> AppResult<Vec<Machine>> {
        Ok(self.filtered(|m| m.secretaire_id == user_id).await)
    }

    async fn find_by_technician(&self, user_id: UserId) -> AppResult<Vec<Machine>> {
        Ok(self.filtered(|m| m.technicien_id == Some(user_id)).await)
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Machine>> {
        let tables = self.tables.read().await;
        Ok(tables
            .machines
            .values()
            .filter(|m| {
                m.equipment_contains(keyword)
                    || tables
                        .clients
                        .get(&m.client_id)
                        .is_some_and(|c| c.name_contains(keyword))
            })
            .cloned()
            .collect())
    }

    async fn count_by_status(&self, status: MachineStatus) -> AppResult<u64> {
        Ok(self.count_matching(|m| m.statut == status).await)
    }

    async fn status_counts(&self) -> AppResult<StatusCounts> {
        let tables = self.tables.read().await;
        let mut counts = StatusCounts::default();
        for machine in tables.machines.values() {
            counts.add(machine.statut, 1);
        }
        Ok(counts)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.machines.len() as u64)
    }

    async fn count_referencing_client(&self, client_id: ClientId) -> AppResult<u64> {
        Ok(self.count_matching(|m| m.client_id == client_id).await)
    }

    async fn count_referencing_user(&self, user_id: UserId) -> AppResult<u64> {
        Ok(self.count_matching(|m| m.references_user(user_id)).await)
    }

    async fn create(&self, input: &NewMachine) -> AppResult<Machine> {
        let mut tables = self.tables.write().await;

        let eligible = tables.clients.contains_key(&input.client_id)
            && has_role(&tables, input.secretaire_id, REGISTRAR_ROLES)
            && input
                .technicien_id
                .is_none_or(|t| has_role(&tables, t, TECHNICIAN_ROLES));
        if !eligible {
            return Err(AppError::referential_conflict(
                "Client, secretary, or technician no longer eligible for this machine",
            ));
        }

        let now = Utc::now();
        let machine = Machine {
            id: tables.next_machine_id(),
            marque: input.marque.clone(),
            modele: input.modele.clone(),
            numero_serie: input.numero_serie.clone(),
            defaut: input.defaut.clone(),
            photo_url: input.photo_url.clone(),
            rendez_vous: input.rendez_vous,
            statut: input.statut,
            montant: input.montant,
            paye: input.paye,
            remarque_technicien: input.remarque_technicien.clone(),
            client_id: input.client_id,
            secretaire_id: input.secretaire_id,
            technicien_id: input.technicien_id,
            created_at: now,
            updated_at: now,
        };
        tables.machines.insert(machine.id, machine.clone());
        Ok(machine)
    }

    async fn update(&self, id: MachineId, changes: &MachineChanges) -> AppResult<Option<Machine>> {
        let mut tables = self.tables.write().await;
        if !tables.machines.contains_key(&id) {
            return Ok(None);
        }

        let eligible = changes
            .client_id
            .is_none_or(|c| tables.clients.contains_key(&c))
            && changes
                .technicien_id
                .is_none_or(|t| has_role(&tables, t, TECHNICIAN_ROLES));
        if !eligible {
            return Err(AppError::referential_conflict(
                "Client or technician no longer eligible for this machine",
            ));
        }

        let Some(machine) = tables.machines.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(machine, Utc::now());
        Ok(Some(machine.clone()))
    }

    async fn delete(&self, id: MachineId) -> AppResult<bool> {
        Ok(self.tables.write().await.machines.remove(&id).is_some())
    }
}
