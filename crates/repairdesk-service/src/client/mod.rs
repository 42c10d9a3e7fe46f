//! Customer registry.

pub mod registry;

pub use registry::ClientRegistry;
