//! In-memory repositories for single-node development and tests.
//!
//! All three repositories share one [`Tables`] value behind a Tokio
//! `RwLock`, so a machine write checks its client and staff references
//! under the same lock that a concurrent delete or role change needs.

mod client;
mod machine;
mod user;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_entity::client::Client;
use repairdesk_entity::machine::Machine;
use repairdesk_entity::user::User;

pub use client::MemoryClientRepository;
pub use machine::MemoryMachineRepository;
pub use user::MemoryUserRepository;

/// Rows of every table plus the identity sequences.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) clients: BTreeMap<ClientId, Client>,
    pub(crate) machines: BTreeMap<MachineId, Machine>,
    last_user_id: i64,
    last_client_id: i64,
    last_machine_id: i64,
}

impl Tables {
    fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId(self.last_user_id)
    }

    fn next_client_id(&mut self) -> ClientId {
        self.last_client_id += 1;
        ClientId(self.last_client_id)
    }

    fn next_machine_id(&mut self) -> MachineId {
        self.last_machine_id += 1;
        MachineId(self.last_machine_id)
    }

    fn client_in_use(&self, id: ClientId) -> bool {
        self.machines.values().any(|m| m.client_id == id)
    }

    fn user_in_use(&self, id: UserId) -> bool {
        self.machines.values().any(|m| m.references_user(id))
    }
}

/// Shared storage behind the in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// User repository over this store.
    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.tables.clone())
    }

    /// Client repository over this store.
    pub fn clients(&self) -> MemoryClientRepository {
        MemoryClientRepository::new(self.tables.clone())
    }

    /// Machine repository over this store.
    pub fn machines(&self) -> MemoryMachineRepository {
        MemoryMachineRepository::new(self.tables.clone())
    }
}
