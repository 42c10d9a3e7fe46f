//! Dashboard statistics service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use repairdesk_core::result::AppResult;
use repairdesk_entity::machine::StatusCounts;

use crate::client::ClientRegistry;
use crate::machine::MachineWorkflow;
use crate::user::UserDirectory;

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_machines: u64,
    pub total_clients: u64,
    pub total_users: u64,
    pub en_cours: u64,
    pub termine: u64,
    pub anomalie: u64,
    pub en_attente: u64,
}

impl DashboardSnapshot {
    fn new(total_machines: u64, total_clients: u64, total_users: u64, counts: StatusCounts) -> Self {
        Self {
            total_machines,
            total_clients,
            total_users,
            en_cours: counts.in_progress,
            termine: counts.done,
            anomalie: counts.anomaly,
            en_attente: counts.pending,
        }
    }
}

/// Computes dashboard totals with count queries only.
#[derive(Debug, Clone)]
pub struct DashboardService {
    directory: Arc<UserDirectory>,
    registry: Arc<ClientRegistry>,
    workflow: Arc<MachineWorkflow>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        directory: Arc<UserDirectory>,
        registry: Arc<ClientRegistry>,
        workflow: Arc<MachineWorkflow>,
    ) -> Self {
        Self {
            directory,
            registry,
            workflow,
        }
    }

    /// Current totals.
    pub async fn snapshot(&self) -> AppResult<DashboardSnapshot> {
        let total_machines = self.workflow.count().await?;
        let total_clients = self.registry.count().await?;
        let total_users = self.directory.count().await?;
        let counts = self.workflow.status_counts().await?;
        Ok(DashboardSnapshot::new(
            total_machines,
            total_clients,
            total_users,
            counts,
        ))
    }
}
