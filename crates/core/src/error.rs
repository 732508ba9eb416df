use thiserror::Error;

/// Errors raised by the statistics functions.
///
/// Degenerate but well-formed input (empty series, zero totals, zero
/// variance) never produces an error; those cases return neutral values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// Input that cannot be interpreted, e.g. paired series of different lengths.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StatsError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
