//! Repair job entities and assignment rules.

pub mod assignment;
pub mod model;
pub mod status;

pub use assignment::{REGISTRAR_ROLES, TECHNICIAN_ROLES};
pub use model::{Machine, MachineChanges, MachineDetails, NewMachine};
pub use status::{MachineStatus, StatusCounts};
