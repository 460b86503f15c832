//! Error types for the separation scheduler and column generation loop.

use thiserror::Error;

/// Error raised by a user-supplied routine (detector, pricing, relaxation).
pub type RoutineError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while configuring or running the control loops.
///
/// Limit terminations are not errors; they surface as status values in the
/// execution logs.
#[derive(Error, Debug)]
pub enum BcpError {
    /// A family name was used that was never registered.
    #[error("Unknown cut family: {0}")]
    UnknownFamily(String),

    /// A family name was registered twice.
    #[error("Cut family already registered: {0}")]
    DuplicateFamily(String),

    /// Adding the dependency edge would close a cycle.
    #[error("Dependency {from} -> {to} would create a cycle")]
    Cycle {
        /// Prerequisite family.
        from: String,
        /// Dependent family.
        to: String,
    },

    /// A family has no separation routine bound to it.
    #[error("Cut family has no separation routine: {0}")]
    MissingRoutine(String),

    /// A separation routine failed; the round was aborted.
    #[error("Separation routine of family {family} failed on iteration {iteration}: {source}")]
    SeparationFailure {
        /// Family whose routine failed.
        family: String,
        /// 1-based invocation count of the family at the time of failure.
        iteration: u64,
        /// Underlying routine error.
        #[source]
        source: RoutineError,
    },

    /// The pricing routine failed; column generation was aborted.
    #[error("Pricing failed on iteration {iteration}: {source}")]
    PricingFailure {
        /// Column generation iteration.
        iteration: u64,
        /// Underlying routine error.
        #[source]
        source: RoutineError,
    },

    /// The relaxation solver could not produce a result.
    #[error("Relaxation solve failed on iteration {iteration}: {source}")]
    RelaxationFailure {
        /// Column generation iteration.
        iteration: u64,
        /// Underlying solver error.
        #[source]
        source: RoutineError,
    },

    /// Column generation was already aborted by a run-time failure.
    #[error("Column generation was aborted on iteration {iteration}")]
    Aborted {
        /// Iteration of the original failure.
        iteration: u64,
    },

    /// Malformed model data (columns, constraints, valuations).
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// A composite log's sub-log was set more than once.
    #[error("Sub-log already set: {0}")]
    SubLogAlreadySet(&'static str),

    /// A configuration document could not be read.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BcpError {
    /// Returns true for errors raised while configuring, before any solving.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BcpError::UnknownFamily(_)
                | BcpError::DuplicateFamily(_)
                | BcpError::Cycle { .. }
                | BcpError::MissingRoutine(_)
                | BcpError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for BcpError {
    fn from(err: serde_json::Error) -> Self {
        BcpError::InvalidConfig(err.to_string())
    }
}

/// Result type for scheduler and column generation operations.
pub type BcpResult<T> = Result<T, BcpError>;
