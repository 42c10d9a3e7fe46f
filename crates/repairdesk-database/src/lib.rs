//! # repairdesk-database
//!
//! Repository traits for users, clients, and machines, with a PostgreSQL
//! implementation (sqlx) and a process-local in-memory implementation that
//! enforces the same uniqueness and foreign-key rules.

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod repositories;

use std::sync::Arc;

use sqlx::PgPool;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::{ClientRepository, MachineRepository, UserRepository};

/// The three repositories the services are built on.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Staff accounts.
    pub users: Arc<dyn UserRepository>,
    /// Customers.
    pub clients: Arc<dyn ClientRepository>,
    /// Repair jobs.
    pub machines: Arc<dyn MachineRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(repositories::PgUserRepository::new(pool.clone())),
            clients: Arc::new(repositories::PgClientRepository::new(pool.clone())),
            machines: Arc::new(repositories::PgMachineRepository::new(pool)),
        }
    }

    /// In-memory repositories sharing one fresh store.
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            clients: Arc::new(store.clients()),
            machines: Arc::new(store.machines()),
        }
    }
}
