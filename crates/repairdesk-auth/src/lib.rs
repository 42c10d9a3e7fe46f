//! # repairdesk-auth
//!
//! Argon2id credential hashing and the password policy applied when
//! staff accounts are created or their secret is rotated.

pub mod password;

pub use password::{PasswordHasher, PasswordValidator};
