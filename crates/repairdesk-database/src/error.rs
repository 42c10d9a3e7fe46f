//! Mapping of sqlx failures onto application error kinds.

use repairdesk_core::error::{AppError, ErrorKind};

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `users.numero`.
pub const USERS_NUMERO_KEY: &str = "users_numero_key";
/// Unique constraint on `clients.numero`.
pub const CLIENTS_NUMERO_KEY: &str = "clients_numero_key";

/// Message used for every duplicate contact number.
pub const DUPLICATE_CONTACT_MESSAGE: &str = "Numéro déjà utilisé";
/// Message used for every duplicate email.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email déjà utilisé";

/// Map a failed read into a database error.
pub fn read_error(context: &str, err: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

/// Map a failed write, translating constraint violations into business
/// errors.
pub fn write_error(context: &str, err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.constraint() {
            Some(USERS_EMAIL_KEY) => return AppError::duplicate_email(DUPLICATE_EMAIL_MESSAGE),
            Some(USERS_NUMERO_KEY) | Some(CLIENTS_NUMERO_KEY) => {
                return AppError::duplicate_contact(DUPLICATE_CONTACT_MESSAGE);
            }
            _ => {}
        }
        if db_err.is_foreign_key_violation() {
            return AppError::referential_conflict(format!(
                "{context}: the record is still referenced by a machine"
            ));
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}

/// Build an `ILIKE` pattern matching `keyword` as a literal substring.
pub fn contains_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("dur"), "%dur%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
