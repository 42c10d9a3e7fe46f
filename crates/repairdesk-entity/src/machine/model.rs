//! Machine (repair job) entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use repairdesk_core::types::{ClientId, MachineId, UserId};

use super::status::MachineStatus;
use crate::client::Client;
use crate::user::User;

/// A repair job as stored in the `machines` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Unique machine identifier.
    pub id: MachineId,
    /// Manufacturer.
    pub marque: String,
    /// Model name.
    pub modele: String,
    /// Serial number, when the customer could provide one.
    pub numero_serie: Option<String>,
    /// Fault description given at intake.
    pub defaut: String,
    /// Reference to a photo of the machine.
    pub photo_url: Option<String>,
    /// Appointment date.
    pub rendez_vous: NaiveDate,
    /// Current lifecycle status.
    pub statut: MachineStatus,
    /// Amount due for the repair.
    pub montant: Option<f64>,
    /// Whether the amount has been paid.
    pub paye: bool,
    /// Technician's notes.
    pub remarque_technicien: Option<String>,
    /// Owning client.
    pub client_id: ClientId,
    /// Secretary (or admin) who registered the machine.
    pub secretaire_id: UserId,
    /// Technician (or admin) assigned to the repair.
    pub technicien_id: Option<UserId>,
    /// When the job was registered.
    pub created_at: DateTime<Utc>,
    /// When the job was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Machine {
    /// Case-insensitive substring match on brand or model.
    pub fn equipment_contains(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.marque.to_lowercase().contains(&needle) || self.modele.to_lowercase().contains(&needle)
    }

    /// Whether `user_id` is the registrar or the assigned technician.
    pub fn references_user(&self, user_id: UserId) -> bool {
        self.secretaire_id == user_id || self.technicien_id == Some(user_id)
    }
}

/// A validated repair job ready to be inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMachine {
    pub marque: String,
    pub modele: String,
    pub numero_serie: Option<String>,
    pub defaut: String,
    pub photo_url: Option<String>,
    pub rendez_vous: NaiveDate,
    pub statut: MachineStatus,
    pub montant: Option<f64>,
    pub paye: bool,
    pub remarque_technicien: Option<String>,
    pub client_id: ClientId,
    pub secretaire_id: UserId,
    pub technicien_id: Option<UserId>,
}

/// Changes applied to an existing repair job.
///
/// Scalar fields always replace the stored values. `statut`, `client_id`,
/// and `technicien_id` only replace them when present; the registrar is
/// never changed after intake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineChanges {
    pub marque: String,
    pub modele: String,
    pub numero_serie: Option<String>,
    pub defaut: String,
    pub photo_url: Option<String>,
    pub rendez_vous: NaiveDate,
    pub montant: Option<f64>,
    pub paye: bool,
    pub remarque_technicien: Option<String>,
    pub statut: Option<MachineStatus>,
    pub client_id: Option<ClientId>,
    pub technicien_id: Option<UserId>,
}

impl MachineChanges {
    /// Apply the changes to `machine` in place, refreshing `updated_at`.
    pub fn apply_to(&self, machine: &mut Machine, now: DateTime<Utc>) {
        machine.marque = self.marque.clone();
        machine.modele = self.modele.clone();
        machine.numero_serie = self.numero_serie.clone();
        machine.defaut = self.defaut.clone();
        machine.photo_url = self.photo_url.clone();
        machine.rendez_vous = self.rendez_vous;
        machine.montant = self.montant;
        machine.paye = self.paye;
        machine.remarque_technicien = self.remarque_technicien.clone();
        if let Some(statut) = self.statut {
            machine.statut = statut;
        }
        if let Some(client_id) = self.client_id {
            machine.client_id = client_id;
        }
        if let Some(technicien_id) = self.technicien_id {
            machine.technicien_id = Some(technicien_id);
        }
        machine.updated_at = now;
    }
}

/// A repair job with its client and staff references resolved.
///
/// This is the shape returned to API consumers: the stored row plus the
/// embedded `client`, `secretaire`, and `technicien` records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineDetails {
    #[serde(flatten)]
    pub machine: Machine,
    pub client: Client,
    pub secretaire: User,
    pub technicien: Option<User>,
}
