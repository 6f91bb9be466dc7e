//! Error types for the solver library

use thiserror::Error;

/// Error type for parsing input data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input format doesn't match expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Required data is missing from input
    #[error("Missing data: {0}")]
    MissingData(String),
}

/// Error type for solving a specific part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part number is out of range (0 or above `PARTS`)
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input parsed, but the puzzle has no answer for it
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap a plain message as a [`SolveError::SolveFailed`]
    pub fn failed(message: impl Into<String>) -> Self {
        SolveError::SolveFailed(message.into().into())
    }
}

/// Error type for solver operations
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver registered for the given key
    #[error("Solver not found for year {year} day {day} ({variant})")]
    NotFound {
        year: u16,
        day: u8,
        variant: &'static str,
    },
    /// Error occurred during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    /// Error occurred during solving
    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A solver is already registered under the same year, day and variant
    #[error("Duplicate solver registration for year {year} day {day} ({variant})")]
    DuplicateSolver {
        year: u16,
        day: u8,
        variant: &'static str,
    },
    /// Day outside 1..=25
    #[error("Invalid day {1} for year {0}")]
    InvalidDay(u16, u8),
}
