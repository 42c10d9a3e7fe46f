//! # repairdesk-core
//!
//! Core crate for RepairDesk. Contains configuration schemas, typed
//! identifiers, collaborator traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RepairDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
