//! Core type definitions used across the RepairDesk workspace.

pub mod id;

pub use id::*;
