//! Staff directory: account registration, profile maintenance, and
//! credential verification.

pub mod directory;

pub use directory::{NewUserProfile, UserDirectory, UserProfileUpdate};
