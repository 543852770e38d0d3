use thiserror::Error;

/// Errors raised by the race core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RaceError {
    /// A guard condition of the requested operation was not met.
    #[error("{0}")]
    Precondition(String),

    /// The operation is not allowed in the current lifecycle state of the race.
    #[error("{0}")]
    InvalidState(String),

    #[error("Insufficient fuel for this action (required {required:.1}, available {available:.1})")]
    InsufficientFuel { required: f64, available: f64 },
}

pub type Result<T> = std::result::Result<T, RaceError>;
