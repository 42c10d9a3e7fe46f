//! Error type shared by every RepairDesk layer.
//!
//! Repositories and services return [`AppError`]; the HTTP layer turns its
//! [`ErrorKind`] into a status code and its message into the response body.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A user, client, or machine id does not resolve.
    NotFound,
    /// The email address belongs to another user.
    DuplicateEmail,
    /// The contact number belongs to another record of the same kind.
    DuplicateContact,
    /// The registrar of a machine is neither secretary nor admin.
    UnauthorizedRole,
    /// The assigned technician is neither technician nor admin.
    InvalidTechnician,
    Validation,
    /// The write would leave a machine pointing at a missing record.
    ReferentialConflict,
    Authentication,
    Database,
    Configuration,
    Internal,
}

impl ErrorKind {
    /// Wire code, e.g. `DUPLICATE_CONTACT`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateContact => "DUPLICATE_CONTACT",
            Self::UnauthorizedRole => "UNAUTHORIZED_ROLE",
            Self::InvalidTechnician => "INVALID_TECHNICIAN",
            Self::Validation => "VALIDATION",
            Self::ReferentialConflict => "REFERENTIAL_CONFLICT",
            Self::Authentication => "AUTHENTICATION",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Internal => "INTERNAL",
        }
    }

    /// Rule violations caused by the caller's input. Everything else is an
    /// infrastructure failure whose details stay in the logs.
    pub fn is_business(&self) -> bool {
        !matches!(self, Self::Database | Self::Configuration | Self::Internal)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A categorized failure with a caller-facing message.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

macro_rules! kind_constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Keeps `source` for logging; it never reaches the response body.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(kind, message)
        }
    }

    kind_constructors! {
        not_found => NotFound,
        duplicate_email => DuplicateEmail,
        duplicate_contact => DuplicateContact,
        /// Registrar role check failed.
        unauthorized_role => UnauthorizedRole,
        /// Technician role check failed.
        invalid_technician => InvalidTechnician,
        validation => Validation,
        referential_conflict => ReferentialConflict,
        authentication => Authentication,
        database => Database,
        configuration => Configuration,
        internal => Internal,
    }
}

/// The source is dropped: boxed errors are not `Clone`.
impl Clone for AppError {
    fn clone(&self) -> Self {
        Self::new(self.kind, self.message.clone())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(ErrorKind::Configuration, format!("Invalid configuration: {err}"), err)
    }
}
