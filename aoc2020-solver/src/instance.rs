//! Parsed solver state and its timing

use crate::error::{ParseError, SolveError};
use crate::key::SolverKey;
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Run `f`, returning its output with the instants it started and finished
fn timed<T>(f: impl FnOnce() -> T) -> (T, DateTime<Utc>, DateTime<Utc>) {
    let start = Utc::now();
    let output = f();
    (output, start, Utc::now())
}

/// Answer to one part, with when solving started and ended (UTC)
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// The data `S` parsed from one input, ready to answer any of its parts
///
/// Parts share the data mutably and run in whatever order they are asked for.
pub struct SolverInstance<'a, S: Solver> {
    key: SolverKey,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` for the solver registered under `key`
    pub fn new(key: SolverKey, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_start, parse_end) = timed(|| S::parse(input));
        Ok(Self {
            key,
            shared: shared?,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as handed out by the registry
///
/// ```no_run
/// use aoc2020_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) -> Result<(), aoc2020_solver::SolveError> {
///     println!("{} parsed in {}", solver.key(), solver.parse_duration());
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("part {part}: {} in {}", result.answer, result.duration());
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Answer `part`, timing only the solve itself
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn key(&self) -> SolverKey;

    /// Number of parts, numbered from 1
    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, solve_start, solve_end) =
            timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn key(&self) -> SolverKey {
        self.key
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AocParser;

    /// Part 1 counts calls to itself, part 2 reports the count
    struct Counter;

    impl AocParser for Counter {
        type SharedData<'a> = u32;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(input.to_string()))
        }
    }

    impl Solver for Counter {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => {
                    *shared += 1;
                    Ok(String::new())
                }
                2 => Ok(shared.to_string()),
                _ => Err(SolveError::PartOutOfRange(part)),
            }
        }
    }

    #[test]
    fn parts_share_state() {
        let mut instance = SolverInstance::<Counter>::new(SolverKey::new(2020, 1), "5").unwrap();
        instance.solve(1).unwrap();
        instance.solve(1).unwrap();
        assert_eq!(instance.solve(2).unwrap().answer, "7");
        assert!(matches!(instance.solve(0), Err(SolveError::PartOutOfRange(0))));
        assert!(matches!(instance.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn parse_failure_has_no_instance() {
        let result = SolverInstance::<Counter>::new(SolverKey::new(2020, 1), "five");
        assert!(matches!(result, Err(ParseError::InvalidFormat(s)) if s == "five"));
    }

    #[test]
    fn timed_orders_instants() {
        let (value, start, end) = timed(|| 42);
        assert_eq!(value, 42);
        assert!(start <= end);
    }
}
