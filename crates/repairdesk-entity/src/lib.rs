//! # repairdesk-entity
//!
//! Domain entity models for RepairDesk. Every struct in this crate is
//! either a database row (deriving `sqlx::FromRow`) or the input shape used
//! to write one. Field names follow the shop's vocabulary (`nom`, `marque`,
//! `statut`, ...) which is also the column naming in the schema; the JSON
//! form is camelCase.

pub mod client;
pub mod machine;
pub mod user;
