//! Collaborator traits defined in `repairdesk-core` and implemented by other crates.

pub mod hasher;

pub use hasher::CredentialHasher;
