//! Shared error and outcome types for the ACS engine.

use thiserror::Error;

/// Errors the ACS engine can surface while building its decision.
///
/// Every variant here corresponds to one of the internal error kinds in the
/// engine's error taxonomy: capability, driver-request, driver-event,
/// empty-survey, selection and handoff errors, plus two defensive variants
/// (`InvalidMeasurement`, `InvalidState`) that guard invariants the data
/// model would otherwise only document in prose.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcsError {
    #[error("driver lacks required off-channel TX capability")]
    CapabilityMissing,

    #[error("driver refused request: {0}")]
    DriverRequest(String),

    #[error("driver event reported failure status {status} for {op}")]
    DriverEvent { op: &'static str, status: i32 },

    #[error("all dwells completed but no survey measurements were gathered")]
    EmptySurvey,

    #[error("no usable channel survived scoring")]
    NoUsableChannel,

    #[error("bring-up of the selected channel failed")]
    Handoff,

    #[error("invalid survey measurement: {0}")]
    InvalidMeasurement(String),

    #[error("operation invalid in controller state {0:?}")]
    InvalidState(&'static str),
}

/// The public tri-state result of a decision request or hook call: `Valid`
/// a decision was made, `Acs` a decision is in progress, `Invalid` the
/// decision is impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcsOutcome {
    Valid,
    Acs,
    Invalid,
}

/// Result the bring-up collaborator hands back to the controller: anything
/// other than `Valid` is treated as failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpResult {
    Valid,
    Failed,
}
