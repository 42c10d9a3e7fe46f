//! Repository traits and their PostgreSQL implementations.
//!
//! Every repository is object-safe and `Send + Sync` so services can hold
//! them as `Arc<dyn ...>` and the backend can be chosen at startup.

pub mod client;
pub mod machine;
pub mod user;

use async_trait::async_trait;

use repairdesk_core::result::AppResult;
use repairdesk_core::types::{ClientId, MachineId, UserId};
use repairdesk_entity::client::{Client, ClientProfile};
use repairdesk_entity::machine::{Machine, MachineChanges, MachineStatus, NewMachine, StatusCounts};
use repairdesk_entity::user::{CreateUser, UpdateUser, User, UserRole};

pub use client::PgClientRepository;
pub use machine::PgMachineRepository;
pub use user::PgUserRepository;

/// Persistence for staff accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find every user whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by exact contact number.
    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<User>>;

    /// All users ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// All users holding `role`, ordered by id.
    async fn find_by_role(&self, role: UserRole) -> AppResult<Vec<User>>;

    /// Whether at least one user holds `role`.
    async fn exists_by_role(&self, role: UserRole) -> AppResult<bool>;

    /// Insert a user. Fails with `DuplicateEmail` or `DuplicateContact`
    /// when a unique column collides.
    async fn create(&self, input: &CreateUser) -> AppResult<User>;

    /// Replace a user's profile. Returns `None` if the user does not exist.
    async fn update(&self, id: UserId, input: &UpdateUser) -> AppResult<Option<User>>;

    /// Delete a user. Returns `false` if it did not exist; fails with
    /// `ReferentialConflict` while a machine references it.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Total number of users.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence for customers.
#[async_trait]
pub trait ClientRepository: Send + Sync + std::fmt::Debug {
    /// Find a client by id.
    async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>>;

    /// Find every client whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[ClientId]) -> AppResult<Vec<Client>>;

    /// Find a client by exact contact number.
    async fn find_by_numero(&self, numero: &str) -> AppResult<Option<Client>>;

    /// All clients ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Client>>;

    /// Clients whose family or given name contains `keyword`, ignoring case.
    async fn search(&self, keyword: &str) -> AppResult<Vec<Client>>;

    /// Insert a client. Fails with `DuplicateContact` on a numero collision.
    async fn create(&self, input: &ClientProfile) -> AppResult<Client>;

    /// Replace a client's profile. Returns `None` if it does not exist.
    async fn update(&self, id: ClientId, input: &ClientProfile) -> AppResult<Option<Client>>;

    /// Delete a client. Returns `false` if it did not exist; fails with
    /// `ReferentialConflict` while a machine references it.
    async fn delete(&self, id: ClientId) -> AppResult<bool>;

    /// Total number of clients.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence for repair jobs.
///
/// `create` and `update` re-assert the client, registrar, and technician
/// references inside the write itself, so a concurrent delete or role
/// change cannot leave a machine pointing at an ineligible record. A
/// failed assertion surfaces as `ReferentialConflict`.
#[async_trait]
pub trait MachineRepository: Send + Sync + std::fmt::Debug {
    /// Find a machine by id.
    async fn find_by_id(&self, id: MachineId) -> AppResult<Option<Machine>>;

    /// All machines ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Machine>>;

    /// Machines in `status`.
    async fn find_by_status(&self, status: MachineStatus) -> AppResult<Vec<Machine>>;

    /// Machines owned by `client_id`.
    async fn find_by_client(&self, client_id: ClientId) -> AppResult<Vec<Machine>>;

    /// Machines registered by `user_id`.
    async fn find_by_secretary(&self, user_id: UserId) -> AppResult<Vec<Machine>>;

    /// Machines assigned to `user_id`.
    async fn find_by_technician(&self, user_id: UserId) -> AppResult<Vec<Machine>>;

    /// Machines whose brand, model, or owner's family or given name
    /// contains `keyword`, ignoring case. Each machine appears once.
    async fn search(&self, keyword: &str) -> AppResult<Vec<Machine>>;

    /// Number of machines in `status`.
    async fn count_by_status(&self, status: MachineStatus) -> AppResult<u64>;

    /// Number of machines in every status.
    async fn status_counts(&self) -> AppResult<StatusCounts>;

    /// Total number of machines.
    async fn count(&self) -> AppResult<u64>;

    /// Number of machines owned by `client_id`.
    async fn count_referencing_client(&self, client_id: ClientId) -> AppResult<u64>;

    /// Number of machines registered by or assigned to `user_id`.
    async fn count_referencing_user(&self, user_id: UserId) -> AppResult<u64>;

    /// Insert a machine.
    async fn create(&self, input: &NewMachine) -> AppResult<Machine>;

    /// Apply `changes` to a machine. Returns `None` if it does not exist.
    async fn update(&self, id: MachineId, changes: &MachineChanges) -> AppResult<Option<Machine>>;

    /// Delete a machine. Returns `false` if it did not exist.
    async fn delete(&self, id: MachineId) -> AppResult<bool>;
}
