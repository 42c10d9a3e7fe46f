//! One-way credential hashing collaborator.

use crate::result::AppResult;

/// Hashes and verifies credential secrets.
///
/// The directory only ever stores the output of [`CredentialHasher::hash`];
/// plaintext secrets are never persisted or compared directly.
pub trait CredentialHasher: Send + Sync + std::fmt::Debug {
    /// Hash a plaintext secret with a fresh salt.
    fn hash(&self, secret: &str) -> AppResult<String>;

    /// Check a plaintext secret against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for malformed
    /// hashes.
    fn verify(&self, secret: &str, hash: &str) -> AppResult<bool>;
}
