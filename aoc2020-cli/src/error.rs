//! Error types for the CLI

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input provider error (session, cache or download)
    #[error("Input error: {0}")]
    Input(#[from] aoc2020_input::InputError),

    /// Solver error
    #[error("Solver error: {0}")]
    Solver(#[from] aoc2020_solver::SolverError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc2020_solver::RegistrationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input fetch failed
    #[error("Input unavailable for {year}/{day:02}: {message}")]
    InputFetch { year: u16, day: u8, message: String },

    /// Solver construction or execution failed
    #[error("{0}")]
    Solver(#[from] aoc2020_solver::SolverError),

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one flat `Multiple`
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(n: u8) -> ArcExecutorError {
        ExecutorError::ThreadPool(n.to_string()).into()
    }

    fn count(error: &ArcExecutorError) -> usize {
        match error.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn combining_flattens() {
        let pair = ArcExecutorError::combine(single(1), single(2));
        assert_eq!(count(&pair), 2);

        let prepended = ArcExecutorError::combine(single(0), pair.clone());
        assert_eq!(count(&prepended), 3);

        let appended = ArcExecutorError::combine(pair.clone(), single(3));
        assert_eq!(count(&appended), 3);

        let both = ArcExecutorError::combine(prepended, appended);
        assert_eq!(count(&both), 6);
        assert_eq!(both.to_string(), "Multiple errors occurred (6 total)");
    }

    #[test]
    fn combine_opt_keeps_lone_error() {
        let lone = ArcExecutorError::combine_opt(None, single(1));
        assert_eq!(count(&lone), 1);
        assert_eq!(lone.to_string(), "Thread pool creation failed: 1");
    }

    #[test]
    fn input_fetch_message() {
        let error: ArcExecutorError = ExecutorError::InputFetch {
            year: 2020,
            day: 7,
            message: "offline".into(),
        }
        .into();
        assert_eq!(error.to_string(), "Input unavailable for 2020/07: offline");
    }
}
