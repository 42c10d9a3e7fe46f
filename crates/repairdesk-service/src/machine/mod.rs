//! Repair job workflow: intake, assignment, lifecycle, and hydration.

pub mod workflow;

pub use workflow::{MachineIntake, MachineWorkflow};
