//! Request DTOs with validation.
//!
//! Field names follow the front-end contract: French vocabulary in
//! camelCase (`numeroSerie`, `rendezVous`, `clientId`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use repairdesk_core::error::AppError;
use repairdesk_core::types::{ClientId, UserId};
use repairdesk_entity::client::ClientProfile;
use repairdesk_entity::machine::{MachineChanges, MachineStatus};
use repairdesk_entity::user::UserRole;
use repairdesk_service::{MachineIntake, NewUserProfile, UserProfileUpdate};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Empty strings are accepted as "no email".
fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Sign-in request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "Email est obligatoire"))]
    pub email: String,
    #[validate(length(min = 1, message = "Mot de passe est obligatoire"))]
    pub password: String,
}

/// Create user request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "Nom est obligatoire"))]
    pub nom: String,
    #[validate(custom(function = "not_blank", message = "Prénom est obligatoire"))]
    pub prenom: String,
    #[validate(custom(function = "not_blank", message = "Adresse est obligatoire"))]
    pub adresse: String,
    #[validate(custom(function = "not_blank", message = "Numéro est obligatoire"))]
    pub numero: String,
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères"))]
    pub password: String,
    #[validate(required(message = "Rôle est obligatoire"))]
    pub role: Option<UserRole>,
}

impl CreateUserRequest {
    /// Converts into the directory's input.
    pub fn into_profile(self) -> Result<NewUserProfile, AppError> {
        let role = self
            .role
            .ok_or_else(|| AppError::validation("Rôle est obligatoire"))?;
        Ok(NewUserProfile {
            nom: self.nom,
            prenom: self.prenom,
            adresse: self.adresse,
            numero: self.numero,
            email: self.email,
            password: self.password,
            role,
        })
    }
}

/// Update user request body. A blank or absent password keeps the
/// current one; `role` is accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank", message = "Nom est obligatoire"))]
    pub nom: String,
    #[validate(custom(function = "not_blank", message = "Prénom est obligatoire"))]
    pub prenom: String,
    #[validate(custom(function = "not_blank", message = "Adresse est obligatoire"))]
    pub adresse: String,
    #[validate(custom(function = "not_blank", message = "Numéro est obligatoire"))]
    pub numero: String,
    #[validate(email(message = "Email invalide"))]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<UpdateUserRequest> for UserProfileUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            nom: req.nom,
            prenom: req.prenom,
            adresse: req.adresse,
            numero: req.numero,
            email: req.email,
            password: non_empty(req.password),
        }
    }
}

/// Create or update client request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    #[validate(custom(function = "not_blank", message = "Nom est obligatoire"))]
    pub nom: String,
    #[validate(custom(function = "not_blank", message = "Prénom est obligatoire"))]
    pub prenom: String,
    #[validate(custom(function = "not_blank", message = "Adresse est obligatoire"))]
    pub adresse: String,
    #[validate(custom(function = "not_blank", message = "Numéro est obligatoire"))]
    pub numero: String,
    #[serde(default)]
    #[validate(custom(function = "optional_email", message = "Email invalide"))]
    pub email: Option<String>,
    #[serde(default)]
    pub autres: Option<String>,
}

impl From<ClientRequest> for ClientProfile {
    fn from(req: ClientRequest) -> Self {
        Self {
            nom: req.nom,
            prenom: req.prenom,
            adresse: req.adresse,
            numero: req.numero,
            email: non_empty(req.email),
            autres: non_empty(req.autres),
        }
    }
}

/// Create or update machine request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MachineRequest {
    #[validate(custom(function = "not_blank", message = "Marque est obligatoire"))]
    pub marque: String,
    #[validate(custom(function = "not_blank", message = "Modèle est obligatoire"))]
    pub modele: String,
    #[serde(default)]
    pub numero_serie: Option<String>,
    #[validate(custom(function = "not_blank", message = "Défaut est obligatoire"))]
    pub defaut: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[validate(required(message = "Date de rendez-vous est obligatoire"))]
    pub rendez_vous: Option<NaiveDate>,
    #[serde(default)]
    pub montant: Option<f64>,
    #[serde(default)]
    pub paye: Option<bool>,
    #[serde(default)]
    pub remarque_technicien: Option<String>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub secretaire_id: Option<UserId>,
    #[serde(default)]
    pub technicien_id: Option<UserId>,
    #[serde(default)]
    pub statut: Option<MachineStatus>,
}

impl MachineRequest {
    fn appointment(&self) -> Result<NaiveDate, AppError> {
        self.rendez_vous
            .ok_or_else(|| AppError::validation("Date de rendez-vous est obligatoire"))
    }

    /// Converts into a workflow intake; client and secretary are required.
    pub fn into_intake(self) -> Result<MachineIntake, AppError> {
        let rendez_vous = self.appointment()?;
        let client_id = self
            .client_id
            .ok_or_else(|| AppError::validation("Client est obligatoire"))?;
        let secretaire_id = self
            .secretaire_id
            .ok_or_else(|| AppError::validation("Secrétaire est obligatoire"))?;
        Ok(MachineIntake {
            marque: self.marque,
            modele: self.modele,
            numero_serie: self.numero_serie,
            defaut: self.defaut,
            photo_url: self.photo_url,
            rendez_vous,
            statut: self.statut,
            montant: self.montant,
            paye: self.paye,
            remarque_technicien: self.remarque_technicien,
            client_id,
            secretaire_id,
            technicien_id: self.technicien_id,
        })
    }

    /// Converts into a full replacement of the scalar fields. An absent
    /// `paye` becomes `false`; `secretaireId` is ignored.
    pub fn into_changes(self) -> Result<MachineChanges, AppError> {
        let rendez_vous = self.appointment()?;
        Ok(MachineChanges {
            marque: self.marque,
            modele: self.modele,
            numero_serie: self.numero_serie,
            defaut: self.defaut,
            photo_url: self.photo_url,
            rendez_vous,
            montant: self.montant,
            paye: self.paye.unwrap_or(false),
            remarque_technicien: self.remarque_technicien,
            statut: self.statut,
            client_id: self.client_id,
            technicien_id: self.technicien_id,
        })
    }
}

/// `?keyword=` query string of the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordQuery {
    #[serde(default)]
    pub keyword: String,
}
