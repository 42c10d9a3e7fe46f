//! Machine workflow service.
//!
//! Intake validates the client and the people attached to a job before
//! writing it; the repository re-asserts the same references inside the
//! write. Status moves freely between the four lifecycle values.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_database::MachineRepository;
use repairdesk_entity::machine::assignment::{ensure_registrar, ensure_technician};
use repairdesk_entity::machine::{
    Machine, MachineChanges, MachineDetails, MachineStatus, NewMachine, StatusCounts,
};
use repairdesk_entity::user::User;

use crate::client::ClientRegistry;
use crate::user::UserDirectory;

const MACHINE_NOT_FOUND: &str = "Machine non trouvée";

/// A repair job as submitted at the front desk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineIntake {
    pub marque: String,
    pub modele: String,
    pub numero_serie: Option<String>,
    pub defaut: String,
    pub photo_url: Option<String>,
    pub rendez_vous: NaiveDate,
    /// Defaults to `EN_ATTENTE`.
    pub statut: Option<MachineStatus>,
    pub montant: Option<f64>,
    /// Defaults to `false`.
    pub paye: Option<bool>,
    pub remarque_technicien: Option<String>,
    pub client_id: ClientId,
    pub secretaire_id: UserId,
    pub technicien_id: Option<UserId>,
}

/// Owns repair jobs and the rules for who may register and repair them.
#[derive(Debug, Clone)]
pub struct MachineWorkflow {
    machines: Arc<dyn MachineRepository>,
    directory: Arc<UserDirectory>,
    registry: Arc<ClientRegistry>,
}

impl MachineWorkflow {
    /// Creates a new machine workflow.
    pub fn new(
        machines: Arc<dyn MachineRepository>,
        directory: Arc<UserDirectory>,
        registry: Arc<ClientRegistry>,
    ) -> Self {
        Self {
            machines,
            directory,
            registry,
        }
    }

    /// Registers a repair job.
    pub async fn create_machine(&self, intake: MachineIntake) -> AppResult<MachineDetails> {
        let client = self.registry.get_client(intake.client_id).await?;
        let secretaire = self.directory.get_user(intake.secretaire_id).await?;
        ensure_registrar(&secretaire)?;
        let technicien = self.resolve_technician(intake.technicien_id).await?;

        let machine = self
            .machines
            .create(&NewMachine {
                marque: intake.marque,
                modele: intake.modele,
                numero_serie: intake.numero_serie,
                defaut: intake.defaut,
                photo_url: intake.photo_url,
                rendez_vous: intake.rendez_vous,
                statut: intake.statut.unwrap_or_default(),
                montant: intake.montant,
                paye: intake.paye.unwrap_or(false),
                remarque_technicien: intake.remarque_technicien,
                client_id: client.id,
                secretaire_id: secretaire.id,
                technicien_id: technicien.as_ref().map(|t| t.id),
            })
            .await?;

        info!(
            machine_id = %machine.id,
            client_id = %client.id,
            secretaire_id = %secretaire.id,
            statut = %machine.statut,
            "Machine registered"
        );
        Ok(MachineDetails {
            machine,
            client,
            secretaire,
            technicien,
        })
    }

    /// Gets a single machine by ID.
    pub async fn get_machine(&self, id: MachineId) -> AppResult<MachineDetails> {
        let machine = self.find(id).await?;
        self.get_hydrated(machine).await
    }

    /// Lists every machine.
    pub async fn list_machines(&self) -> AppResult<Vec<MachineDetails>> {
        let machines = self.machines.find_all().await?;
        self.hydrate(machines).await
    }

    /// Lists the machines in `status`.
    pub async fn list_by_status(&self, status: MachineStatus) -> AppResult<Vec<MachineDetails>> {
        let machines = self.machines.find_by_status(status).await?;
        self.hydrate(machines).await
    }

    /// Lists the machines owned by a client.
    pub async fn list_by_client(&self, client_id: ClientId) -> AppResult<Vec<MachineDetails>> {
        let machines = self.machines.find_by_client(client_id).await?;
        self.hydrate(machines).await
    }

    /// Lists the machines registered by a secretary.
    pub async fn list_by_secretary(&self, user_id: UserId) -> AppResult<Vec<MachineDetails>> {
        let machines = self.machines.find_by_secretary(user_id).await?;
        self.hydrate(machines).await
    }

    /// Lists the machines assigned to a technician.
    pub async fn list_by_technician(&self, user_id: UserId) -> AppResult<Vec<MachineDetails>> {
        let machines = self.machines.find_by_technician(user_id).await?;
        self.hydrate(machines).await
    }

    /// Applies a full replacement of the scalar fields.
    ///
    /// A given client or technician is re-resolved; the registrar is kept.
    pub async fn update_machine(
        &self,
        id: MachineId,
        changes: MachineChanges,
    ) -> AppResult<MachineDetails> {
        let before = self.find(id).await?;

        if let Some(client_id) = changes.client_id {
            self.registry.get_client(client_id).await?;
        }
        self.resolve_technician(changes.technicien_id).await?;

        let machine = self
            .machines
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(MACHINE_NOT_FOUND))?;

        if before.statut != machine.statut {
            info!(
                machine_id = %id,
                from = %before.statut,
                to = %machine.statut,
                "Machine status changed"
            );
        } else {
            debug!(machine_id = %id, "Machine updated");
        }
        self.get_hydrated(machine).await
    }

    /// Deletes a machine.
    pub async fn delete_machine(&self, id: MachineId) -> AppResult<()> {
        self.find(id).await?;
        if !self.machines.delete(id).await? {
            return Err(AppError::not_found(MACHINE_NOT_FOUND));
        }
        info!(machine_id = %id, "Machine deleted");
        Ok(())
    }

    /// Number of machines in `status`.
    pub async fn count_by_status(&self, status: MachineStatus) -> AppResult<u64> {
        self.machines.count_by_status(status).await
    }

    /// Number of machines in every status.
    pub async fn status_counts(&self) -> AppResult<StatusCounts> {
        self.machines.status_counts().await
    }

    /// Total number of machines.
    pub async fn count(&self) -> AppResult<u64> {
        self.machines.count().await
    }

    /// Resolves client and staff references for a batch of machines,
    /// preserving order. Costs one lookup per referenced table.
    pub async fn hydrate(&self, machines: Vec<Machine>) -> AppResult<Vec<MachineDetails>> {
        if machines.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids: Vec<ClientId> = machines
            .iter()
            .map(|m| m.client_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let user_ids: Vec<UserId> = machines
            .iter()
            .flat_map(|m| std::iter::once(m.secretaire_id).chain(m.technicien_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let clients: HashMap<_, _> = self
            .registry
            .find_many(&client_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let users: HashMap<_, _> = self
            .directory
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        machines
            .into_iter()
            .map(|machine| {
                let client = clients.get(&machine.client_id).cloned().ok_or_else(|| {
                    AppError::internal(format!("Machine {} has a dangling client", machine.id))
                })?;
                let secretaire = users.get(&machine.secretaire_id).cloned().ok_or_else(|| {
                    AppError::internal(format!("Machine {} has a dangling secretary", machine.id))
                })?;
                let technicien = machine.technicien_id.and_then(|t| users.get(&t).cloned());
                Ok(MachineDetails {
                    machine,
                    client,
                    secretaire,
                    technicien,
                })
            })
            .collect()
    }

    async fn find(&self, id: MachineId) -> AppResult<Machine> {
        self.machines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(MACHINE_NOT_FOUND))
    }

    async fn get_hydrated(&self, machine: Machine) -> AppResult<MachineDetails> {
        let id = machine.id;
        self.hydrate(vec![machine])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal(format!("Hydration dropped machine {id}")))
    }

    async fn resolve_technician(&self, id: Option<UserId>) -> AppResult<Option<User>> {
        match id {
            Some(id) => {
                let technicien = self.directory.get_user(id).await?;
                ensure_technician(&technicien)?;
                Ok(Some(technicien))
            }
            None => Ok(None),
        }
    }
}
