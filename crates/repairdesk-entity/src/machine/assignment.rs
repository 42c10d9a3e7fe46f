//! Role rules for the people attached to a repair job.
//!
//! Both checks are pure functions over named role sets so the same rule is
//! applied by the workflow service and by the repositories when they
//! re-assert references inside the write.

use repairdesk_core::error::AppError;

use crate::user::{User, UserRole};

/// Roles allowed to register a machine.
pub const REGISTRAR_ROLES: &[UserRole] = &[UserRole::Secretary, UserRole::Admin];

/// Roles allowed to be assigned a repair.
pub const TECHNICIAN_ROLES: &[UserRole] = &[UserRole::Technician, UserRole::Admin];

/// Fails with `UnauthorizedRole` unless `user` may register machines.
pub fn ensure_registrar(user: &User) -> Result<(), AppError> {
    if user.role.is_one_of(REGISTRAR_ROLES) {
        Ok(())
    } else {
        Err(AppError::unauthorized_role(
            "Seuls les secrétaires peuvent enregistrer des machines",
        ))
    }
}

/// Fails with `InvalidTechnician` unless `user` may be assigned repairs.
pub fn ensure_technician(user: &User) -> Result<(), AppError> {
    if user.role.is_one_of(TECHNICIAN_ROLES) {
        Ok(())
    } else {
        Err(AppError::invalid_technician("Technicien invalide"))
    }
}

/// Role names of a set, as stored in the `user_role` column.
pub fn role_names(roles: &[UserRole]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use repairdesk_core::error::ErrorKind;
    use repairdesk_core::types::UserId;

    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: UserId(1),
            nom: "Test".into(),
            prenom: "User".into(),
            adresse: "1 rue".into(),
            numero: "0600000001".into(),
            email: "t@x.com".into(),
            password_hash: String::new(),
            role,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_registrar_roles() {
        assert!(ensure_registrar(&user(UserRole::Secretary)).is_ok());
        assert!(ensure_registrar(&user(UserRole::Admin)).is_ok());
        let err = ensure_registrar(&user(UserRole::Technician)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnauthorizedRole);
    }

    #[test]
    fn test_technician_roles() {
        assert!(ensure_technician(&user(UserRole::Technician)).is_ok());
        assert!(ensure_technician(&user(UserRole::Admin)).is_ok());
        let err = ensure_technician(&user(UserRole::Secretary)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTechnician);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(role_names(REGISTRAR_ROLES), vec!["SECRETAIRE", "ADMIN"]);
    }
}
