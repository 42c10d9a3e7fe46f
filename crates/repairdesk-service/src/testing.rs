//! Shared fixtures for the service tests.

use std::sync::Arc;

use chrono::NaiveDate;

use repairdesk_auth::{PasswordHasher, PasswordValidator};
use repairdesk_core::config::AuthConfig;
use repairdesk_core::types::{ClientId, UserId};
use repairdesk_database::Repositories;
use repairdesk_entity::client::{Client, ClientProfile};
use repairdesk_entity::machine::{Machine, MachineChanges};
use repairdesk_entity::user::{User, UserRole};

use crate::client::ClientRegistry;
use crate::machine::{MachineIntake, MachineWorkflow};
use crate::report::DashboardService;
use crate::search::SearchService;
use crate::user::{NewUserProfile, UserDirectory};

pub(crate) struct Fixture {
    pub directory: Arc<UserDirectory>,
    pub registry: Arc<ClientRegistry>,
    pub workflow: Arc<MachineWorkflow>,
    pub search: SearchService,
    pub dashboard: DashboardService,
}

impl Fixture {
    pub fn new() -> Self {
        let repos = Repositories::memory();
        let directory = Arc::new(UserDirectory::new(
            repos.users.clone(),
            repos.machines.clone(),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&AuthConfig::default())),
        ));
        let registry = Arc::new(ClientRegistry::new(
            repos.clients.clone(),
            repos.machines.clone(),
        ));
        let workflow = Arc::new(MachineWorkflow::new(
            repos.machines.clone(),
            directory.clone(),
            registry.clone(),
        ));
        let search = SearchService::new(repos.clients, repos.machines, workflow.clone());
        let dashboard = DashboardService::new(directory.clone(), registry.clone(), workflow.clone());
        Self {
            directory,
            registry,
            workflow,
            search,
            dashboard,
        }
    }

    /// A client named Durand, a secretary, and a technician.
    pub async fn seed(&self) -> (Client, User, User) {
        let client = self
            .registry
            .create_client(client_profile("Durand", "0698765432"))
            .await
            .unwrap();
        let secretary = self
            .directory
            .create_user(profile("s@x.com", "0600000001", UserRole::Secretary))
            .await
            .unwrap();
        let technician = self
            .directory
            .create_user(profile("t@x.com", "0600000002", UserRole::Technician))
            .await
            .unwrap();
        (client, secretary, technician)
    }

    pub fn intake(&self, client_id: ClientId, secretaire_id: UserId) -> MachineIntake {
        MachineIntake {
            marque: "Dell".into(),
            modele: "Latitude".into(),
            numero_serie: None,
            defaut: "écran cassé".into(),
            photo_url: None,
            rendez_vous: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            statut: None,
            montant: None,
            paye: None,
            remarque_technicien: None,
            client_id,
            secretaire_id,
            technicien_id: None,
        }
    }
}

pub(crate) fn profile(email: &str, numero: &str, role: UserRole) -> NewUserProfile {
    NewUserProfile {
        nom: "Martin".into(),
        prenom: "Claire".into(),
        adresse: "2 avenue Foch".into(),
        numero: numero.into(),
        email: email.into(),
        password: "secret1".into(),
        role,
    }
}

pub(crate) fn client_profile(nom: &str, numero: &str) -> ClientProfile {
    ClientProfile {
        nom: nom.into(),
        prenom: "Alice".into(),
        adresse: "1 rue Haute".into(),
        numero: numero.into(),
        email: None,
        autres: None,
    }
}

/// Changes that rewrite `machine` with its current values.
pub(crate) fn changes_from(machine: &Machine) -> MachineChanges {
    MachineChanges {
        marque: machine.marque.clone(),
        modele: machine.modele.clone(),
        numero_serie: machine.numero_serie.clone(),
        defaut: machine.defaut.clone(),
        photo_url: machine.photo_url.clone(),
        rendez_vous: machine.rendez_vous,
        montant: machine.montant,
        paye: machine.paye,
        remarque_technicien: machine.remarque_technicien.clone(),
        statut: None,
        client_id: None,
        technicien_id: None,
    }
}
