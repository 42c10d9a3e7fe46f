//! Repair status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle tag of a repair job.
///
/// Any status may follow any other; there is no transition table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "machine_status")]
pub enum MachineStatus {
    /// Registered, waiting for a technician.
    #[default]
    #[sqlx(rename = "EN_ATTENTE")]
    #[serde(rename = "EN_ATTENTE")]
    Pending,
    /// Repair under way.
    #[sqlx(rename = "EN_COURS")]
    #[serde(rename = "EN_COURS")]
    InProgress,
    /// Repair finished.
    #[sqlx(rename = "TERMINE")]
    #[serde(rename = "TERMINE")]
    Done,
    /// Blocked on a problem.
    #[sqlx(rename = "ANOMALIE")]
    #[serde(rename = "ANOMALIE")]
    Anomaly,
}

impl MachineStatus {
    /// Every status, in declaration order.
    pub const ALL: [MachineStatus; 4] = [Self::Pending, Self::InProgress, Self::Done, Self::Anomaly];

    /// Return the status as stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "EN_ATTENTE",
            Self::InProgress => "EN_COURS",
            Self::Done => "TERMINE",
            Self::Anomaly => "ANOMALIE",
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MachineStatus {
    type Err = repairdesk_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EN_ATTENTE" => Ok(Self::Pending),
            "EN_COURS" => Ok(Self::InProgress),
            "TERMINE" => Ok(Self::Done),
            "ANOMALIE" => Ok(Self::Anomaly),
            _ => Err(repairdesk_core::AppError::validation(format!(
                "Invalid machine status: '{s}'. Expected one of: EN_ATTENTE, EN_COURS, TERMINE, ANOMALIE"
            ))),
        }
    }
}

/// Number of machines in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub in_progress: u64,
    pub done: u64,
    pub anomaly: u64,
}

impl StatusCounts {
    /// Count for a single status.
    pub fn get(&self, status: MachineStatus) -> u64 {
        match status {
            MachineStatus::Pending => self.pending,
            MachineStatus::InProgress => self.in_progress,
            MachineStatus::Done => self.done,
            MachineStatus::Anomaly => self.anomaly,
        }
    }

    /// Add `n` to the counter for `status`.
    pub fn add(&mut self, status: MachineStatus, n: u64) {
        match status {
            MachineStatus::Pending => self.pending += n,
            MachineStatus::InProgress => self.in_progress += n,
            MachineStatus::Done => self.done += n,
            MachineStatus::Anomaly => self.anomaly += n,
        }
    }

    /// Sum over all statuses.
    pub fn total(&self) -> u64 {
        self.pending + self.in_progress + self.done + self.anomaly
    }
}
