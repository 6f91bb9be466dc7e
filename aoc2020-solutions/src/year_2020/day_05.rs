//! Day 5: Binary Boarding

use crate::utils::parse::{no_solution, parse_lines};
use anyhow::{anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["binary"])]
pub struct Solver;

/// Seat id of a boarding pass: F/L are 0 bits, B/R are 1 bits
fn seat_id(pass: &str) -> anyhow::Result<u16> {
    if pass.len() != 10 {
        bail!("boarding pass must have 10 characters, got {}", pass.len());
    }
    pass.chars().try_fold(0u16, |id, c| match c {
        'F' | 'L' => Ok(id << 1),
        'B' | 'R' => Ok(id << 1 | 1),
        other => Err(anyhow!("unexpected {:?}", other)),
    })
}

impl AocParser for Solver {
    /// Seat ids, sorted
    type SharedData<'a> = Vec<u16>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ids = parse_lines(input, seat_id)?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .last()
            .map(|id| id.to_string())
            .ok_or_else(|| no_solution(anyhow!("no boarding passes")))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .windows(2)
            .find(|pair| pair[1] - pair[0] == 2)
            .map(|pair| (pair[0] + 1).to_string())
            .ok_or_else(|| no_solution(anyhow!("no free seat between two taken seats")))
    }
}
