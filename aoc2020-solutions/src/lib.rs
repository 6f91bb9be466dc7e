//! Advent of Code 2020 puzzle solutions with automatic registration
//!
//! One module per day under [`year_2020`]; days with a second, independently
//! written solution keep it next to the first as `day_NN_alternate`, registered
//! under the `"alternate"` variant. Every solver registers itself through
//! `#[derive(AutoRegisterSolver)]`, so linking this crate is enough:
//!
//! ```
//! use aoc2020_solutions as _;
//! use aoc2020_solver::{RegistryBuilder, SolverKey};
//!
//! let registry = RegistryBuilder::new().register_all_plugins().unwrap().build();
//! let mut solver = registry
//!     .create_solver(&SolverKey::new(2020, 1), "1721\n979\n366\n299\n675\n1456")
//!     .unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "514579");
//! ```

pub mod utils;
pub mod year_2020;
