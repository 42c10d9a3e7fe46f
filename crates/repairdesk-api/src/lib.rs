//! # repairdesk-api
//!
//! HTTP API layer for RepairDesk built on Axum.
//!
//! Provides the REST endpoints for users, clients, machines, and the
//! dashboard, plus middleware (CORS, request logging), extractors, DTOs,
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
