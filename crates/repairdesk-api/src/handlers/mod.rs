//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod health;
pub mod machine;
pub mod user;
