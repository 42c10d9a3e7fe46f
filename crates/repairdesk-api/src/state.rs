//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use repairdesk_auth::{PasswordHasher, PasswordValidator};
use repairdesk_core::config::AppConfig;
use repairdesk_database::Repositories;
use repairdesk_service::{
    ClientRegistry, DashboardService, MachineWorkflow, SearchService, UserDirectory,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Staff accounts
    pub directory: Arc<UserDirectory>,
    /// Customers
    pub registry: Arc<ClientRegistry>,
    /// Repair jobs
    pub workflow: Arc<MachineWorkflow>,
    /// Keyword search
    pub search: Arc<SearchService>,
    /// Dashboard totals
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wires every service over `repos`.
    pub fn new(config: AppConfig, repos: Repositories) -> Self {
        let hasher = Arc::new(PasswordHasher::new());
        let validator = Arc::new(PasswordValidator::new(&config.auth));

        let directory = Arc::new(UserDirectory::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.machines),
            hasher,
            validator,
        ));
        let registry = Arc::new(ClientRegistry::new(
            Arc::clone(&repos.clients),
            Arc::clone(&repos.machines),
        ));
        let workflow = Arc::new(MachineWorkflow::new(
            Arc::clone(&repos.machines),
            Arc::clone(&directory),
            Arc::clone(&registry),
        ));
        let search = Arc::new(SearchService::new(
            Arc::clone(&repos.clients),
            Arc::clone(&repos.machines),
            Arc::clone(&workflow),
        ));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&directory),
            Arc::clone(&registry),
            Arc::clone(&workflow),
        ));

        Self {
            config: Arc::new(config),
            directory,
            registry,
            workflow,
            search,
            dashboard,
        }
    }
}
