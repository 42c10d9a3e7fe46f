//! Typed path parameter helpers.
//!
//! Segments are taken as `Path<String>` and parsed here so a malformed
//! value is rejected with the JSON error body instead of axum's plain text.

use std::str::FromStr;

use repairdesk_core::error::AppError;
use repairdesk_entity::machine::MachineStatus;
use repairdesk_entity::user::UserRole;

/// Parses a numeric id segment into `UserId`, `ClientId`, or `MachineId`.
pub fn parse_id<T: FromStr>(s: &str) -> Result<T, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Identifiant invalide : '{s}'")))
}

/// Parses a role path segment (`TECHNICIEN`, `technician`, ...).
pub fn parse_role(s: &str) -> Result<UserRole, AppError> {
    s.parse()
}

/// Parses a status path segment (`EN_COURS`, ...).
pub fn parse_status(s: &str) -> Result<MachineStatus, AppError> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use repairdesk_core::error::ErrorKind;
    use repairdesk_core::types::MachineId;

    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<MachineId>("42").unwrap(), MachineId(42));
        let err = parse_id::<MachineId>("abc").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("abc"));
    }
}
