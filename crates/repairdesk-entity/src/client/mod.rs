//! Repair-service customer entities.

pub mod model;

pub use model::{Client, ClientProfile};
