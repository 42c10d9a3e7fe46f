//! Staff role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a staff account can hold. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    /// Full access; may also register machines and take repairs.
    #[sqlx(rename = "ADMIN")]
    #[serde(rename = "ADMIN")]
    Admin,
    /// Front-desk staff who register incoming machines.
    #[sqlx(rename = "SECRETAIRE")]
    #[serde(rename = "SECRETAIRE", alias = "SECRETARY")]
    Secretary,
    /// Performs repairs on assigned machines.
    #[sqlx(rename = "TECHNICIEN")]
    #[serde(rename = "TECHNICIEN", alias = "TECHNICIAN")]
    Technician,
}

impl UserRole {
    /// Every role, in declaration order.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Secretary, Self::Technician];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Membership test against an allowed-role set.
    pub fn is_one_of(&self, allowed: &[UserRole]) -> bool {
        allowed.contains(self)
    }

    /// Return the role as stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Secretary => "SECRETAIRE",
            Self::Technician => "TECHNICIEN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = repairdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "SECRETAIRE" | "SECRETARY" => Ok(Self::Secretary),
            "TECHNICIEN" | "TECHNICIAN" => Ok(Self::Technician),
            _ => Err(repairdesk_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: ADMIN, SECRETAIRE, TECHNICIEN"
            ))),
        }
    }
}
