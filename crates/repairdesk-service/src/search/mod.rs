//! Keyword search across clients and machines.

use std::sync::Arc;

use tracing::debug;

use repairdesk_core::result::AppResult;
use repairdesk_database::{ClientRepository, MachineRepository};
use repairdesk_entity::client::Client;
use repairdesk_entity::machine::MachineDetails;

use crate::machine::MachineWorkflow;

/// Read-only keyword search. Matching is case-insensitive substring
/// containment.
#[derive(Debug, Clone)]
pub struct SearchService {
    clients: Arc<dyn ClientRepository>,
    machines: Arc<dyn MachineRepository>,
    workflow: Arc<MachineWorkflow>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        machines: Arc<dyn MachineRepository>,
        workflow: Arc<MachineWorkflow>,
    ) -> Self {
        Self {
            clients,
            machines,
            workflow,
        }
    }

    /// Clients whose family or given name contains `keyword`.
    pub async fn search_clients(&self, keyword: &str) -> AppResult<Vec<Client>> {
        let found = self.clients.search(keyword).await?;
        debug!(keyword, hits = found.len(), "Client search");
        Ok(found)
    }

    /// Machines whose brand, model, or owner's name contains `keyword`.
    /// Each machine appears at most once.
    pub async fn search_machines(&self, keyword: &str) -> AppResult<Vec<MachineDetails>> {
        let found = self.machines.search(keyword).await?;
        debug!(keyword, hits = found.len(), "Machine search");
        self.workflow.hydrate(found).await
    }
}
