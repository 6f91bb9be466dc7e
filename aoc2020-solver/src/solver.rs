//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Turns puzzle input into the data every part of a solver works on.
///
/// `SharedData` may borrow from the input:
///
/// ```
/// use aoc2020_solver::{AocParser, ParseError};
///
/// struct Passwords;
///
/// impl AocParser for Passwords {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         let lines: Vec<_> = input.lines().filter(|l| !l.is_empty()).collect();
///         if lines.is_empty() {
///             return Err(ParseError::MissingData("no passwords".into()));
///         }
///         Ok(lines)
///     }
/// }
///
/// assert_eq!(Passwords::parse("abc\n\ndef\n").unwrap(), vec!["abc", "def"]);
/// assert!(Passwords::parse("").is_err());
/// ```
pub trait AocParser {
    /// Parsed input, plus anything a part wants to leave behind for later parts.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answers part `N` of a puzzle.
///
/// ```
/// use aoc2020_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let increases = depths.windows(2).filter(|w| w[1] > w[0]).count();
///         Ok(increases.to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("3\n5\n4\n9").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Answers a part chosen at runtime.
///
/// Normally derived: `#[derive(AocSolver)]` with `#[aoc_solver(max_parts = N)]`
/// forwards part `k` to `PartSolver<k>` and rejects anything above `N`.
/// Implementing it by hand is fine for solvers whose parts share one routine:
///
/// ```
/// use aoc2020_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Window;
///
/// impl AocParser for Window {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split(',')
///             .map(|n| n.trim().parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for Window {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let width = match part {
///             1 => 1,
///             2 => 3,
///             _ => return Err(SolveError::PartOutOfRange(part)),
///         };
///         let sums: Vec<u32> = shared.windows(width).map(|w| w.iter().sum()).collect();
///         Ok(sums.windows(2).filter(|w| w[1] > w[0]).count().to_string())
///     }
/// }
///
/// let mut shared = Window::parse("1, 2, 1, 3, 4").unwrap();
/// assert_eq!(Window::solve_part(&mut shared, 1).unwrap(), "3");
/// assert_eq!(Window::solve_part(&mut shared, 2).unwrap(), "2");
/// ```
pub trait Solver: AocParser {
    /// Parts are numbered `1..=PARTS`
    const PARTS: u8;

    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartOutOfRange)` - The part does not exist
    /// * `Err(SolveError::SolveFailed)` - The input has no answer
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked dispatch, available on every [`Solver`].
///
/// Hand-written `solve_part` implementations need not guard against part 0 or
/// parts above `PARTS`; callers going through this trait never reach them.
pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
