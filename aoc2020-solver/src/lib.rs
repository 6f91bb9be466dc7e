//! Advent of Code solver library
//!
//! Traits, per-run instances and a registry for puzzle solvers. Each solver
//! parses its input into its own shared data and answers its parts from it;
//! solvers never see each other. A day may have more than one solver, told
//! apart by the variant in its [`SolverKey`].
//!
//! # Quick Example
//!
//! ```
//! use aoc2020_solver::{AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError, SolverKey};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Day1;
//!
//! impl AocParser for Day1 {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i32>().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Day1>(SolverKey::new(2020, 1))
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(&SolverKey::new(2020, 1), "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "6");
//! ```
//!
//! # Key Concepts
//!
//! - [`AocParser`] turns the input into `SharedData`, which may borrow from the input.
//! - [`PartSolver<N>`] answers part `N` with mutable access to the shared data, so a
//!   part can leave results behind for later parts.
//! - [`Solver`] dispatches a runtime part number; `#[derive(AocSolver)]` writes it.
//! - [`DynSolver`] is the type-erased, timed instance the registry hands out.
//! - `#[derive(AutoRegisterSolver)]` with `#[aoc(year = .., day = .., variant = .., tags = [..])]`
//!   submits a [`SolverPlugin`], collected by [`RegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod key;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use key::{MAIN_VARIANT, SolverKey};
pub use registry::{
    DAYS_PER_YEAR, FactoryInfo, RegisterableSolver, RegistryBuilder, SolverFactory, SolverPlugin,
    SolverRegistry,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
