//! # repairdesk-service
//!
//! Business logic service layer for RepairDesk. Each service orchestrates
//! repositories and collaborators to implement one part of the intake
//! workflow.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod bootstrap;
pub mod client;
pub mod machine;
pub mod report;
pub mod search;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::ensure_default_admin;
pub use client::ClientRegistry;
pub use machine::{MachineIntake, MachineWorkflow};
pub use report::{DashboardService, DashboardSnapshot};
pub use search::SearchService;
pub use user::{NewUserProfile, UserDirectory, UserProfileUpdate};
