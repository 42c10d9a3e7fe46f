//! Custom Axum extractors.

pub mod path;
pub mod validated;

pub use path::{parse_id, parse_role, parse_status};
pub use validated::ValidatedJson;
