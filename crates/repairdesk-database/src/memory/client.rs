use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use repairdesk_core::error::AppError;
use repairdesk_core::result::AppResult;
use repairdesk_core::types::ClientId;
use repairdesk_entity::client::{Client, ClientProfile};

use super::Tables;
use crate::error::DUPLICATE_CONTACT_MESSAGE;
use crate::repositories::ClientRepository;

/// In-memory client repository.
#[derive(Debug, Clone)]
pub struct MemoryClientRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryClientRepository {
    pub(crate) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn check_unique(tables: &Tables, numero: &str, except: Option<ClientId>) -> AppResult<()> {
    if tables
        .clients
        .values()
        .any(|c| Some(c.id) != except && c.numero == numero)
    {
        return Err(AppError::duplicate_contact(DUPLICATE_CONTACT_MESSAGE));
    }
    Ok(())
}

#[async_trait]
impl ClientRepository for MemoryClientRepository {
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>> {
        Ok(self.tables.read().await.clients.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ClientId]) -> AppResult<Vec<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .values()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<Client>> {
        let tables = self.tables.read().await;
        Ok(tables.clients.values().find(|c| c.numero == numero).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Client>> {
        Ok(self.tables.read().await.clients.values().cloned().collect())
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<Client>> {
        let tables = self.tables.read().await;
        Ok(tables
            .clients
            .values()
            .filter(|c| c.name_contains(keyword))
            .cloned()
            .collect())
    }

    async fn create(&self, input: &ClientProfile) -> AppResult<Client> {
        let mut tables = self.tables.write().await;
        check_unique(&tables, &input.numero, None)?;

        let client = Client {
            id: tables.next_client_id(),
            nom: input.nom.clone(),
            prenom: input.prenom.clone(),
            adresse: input.adresse.clone(),
            numero: input.numero.clone(),
            email: input.email.clone(),
            autres: input.autres.clone(),
            created_at: Utc::now(),
        };
        tables.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn update(&self, id: ClientId, input: &ClientProfile) -> AppResult<Option<Client>> {
        let mut tables = self.tables.write().await;
        if !tables.clients.contains_key(&id) {
            return Ok(None);
        }
        check_unique(&tables, &input.numero, Some(id))?;

        let Some(client) = tables.clients.get_mut(&id) else {
            return Ok(None);
        };
        client.nom = input.nom.clone();
        client.prenom = input.prenom.clone();
        client.adresse = input.adresse.clone();
        client.numero = input.numero.clone();
        client.email = input.email.clone();
        client.autres = input.autres.clone();
        Ok(Some(client.clone()))
    }

    async fn delete(&self, id: ClientId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.client_in_use(id) {
            return Err(AppError::referential_conflict(
                "Failed to delete client: the record is still referenced by a machine",
            ));
        }
        Ok(tables.clients.remove(&id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.tables.read().await.clients.len() as u64)
    }
}
