//! Client registry service.

use std::sync::Arc;

use tracing::{info, warn};

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::ClientId;
use repairdesk_database::{ClientRepository, MachineRepository};
use repairdesk_entity::client::{Client, ClientProfile};

const CLIENT_NOT_FOUND: &str = "Client non trouvé";
const NUMERO_TAKEN: &str = "Numéro déjà utilisé";

/// Owns customer records and their unique contact numbers.
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    clients: Arc<dyn ClientRepository>,
    machines: Arc<dyn MachineRepository>,
}

impl ClientRegistry {
    /// Creates a new client registry.
    pub fn new(clients: Arc<dyn ClientRepository>, machines: Arc<dyn MachineRepository>) -> Self {
        Self { clients, machines }
    }

    /// Registers a new client.
    pub async fn create_client(&self, profile: ClientProfile) -> AppResult<Client> {
        if self.clients.find_by_numero(&profile.numero).await?.is_some() {
            return Err(AppError::duplicate_contact(NUMERO_TAKEN));
        }

        let client = self.clients.create(&profile).await?;
        info!(client_id = %client.id, "Client created");
        Ok(client)
    }

    /// Gets a single client by ID.
    pub async fn get_client(&self, id: ClientId) -> AppResult<Client> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))
    }

    /// Clients whose id is in `ids`; unknown ids are skipped.
    pub async fn find_many(&self, ids: &[ClientId]) -> AppResult<Vec<Client>> {
        self.clients.find_by_ids(ids).await
    }

    /// Lists every client.
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.clients.find_all().await
    }

    /// Overwrites every profile field.
    pub async fn update_client(&self, id: ClientId, profile: ClientProfile) -> AppResult<Client> {
        self.get_client(id).await?;

        if let Some(existing) = self.clients.find_by_numero(&profile.numero).await? {
            if existing.id != id {
                return Err(AppError::duplicate_contact(NUMERO_TAKEN));
            }
        }

        let client = self
            .clients
            .update(id, &profile)
            .await?
            .ok_or_else(|| AppError::not_found(CLIENT_NOT_FOUND))?;
        info!(client_id = %id, "Client updated");
        Ok(client)
    }

    /// Deletes a client that owns no machine.
    pub async fn delete_client(&self, id: ClientId) -> AppResult<()> {
        self.get_client(id).await?;

        let references = self.machines.count_referencing_client(id).await?;
        if references > 0 {
            warn!(client_id = %id, references, "Refusing to delete referenced client");
            return Err(AppError::referential_conflict(format!(
                "Client référencé par {references} machine(s)"
            )));
        }

        if !self.clients.delete(id).await? {
            return Err(AppError::not_found(CLIENT_NOT_FOUND));
        }
        info!(client_id = %id, "Client deleted");
        Ok(())
    }

    /// Total number of clients.
    pub async fn count(&self) -> AppResult<u64> {
        self.clients.count().await
    }
}
