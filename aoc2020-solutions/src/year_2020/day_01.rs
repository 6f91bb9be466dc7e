//! Day 1: Report Repair

use crate::utils::parse::{no_solution, parse_lines};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

const TARGET: i64 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["combinatorics"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| Ok(line.parse::<i64>()?))
    }
}

/// Product of the first `count` entries, at distinct positions, that add up to 2020
fn product_of_entries(entries: &[i64], count: usize) -> Result<i64, SolveError> {
    entries
        .iter()
        .combinations(count)
        .find(|combination| combination.iter().copied().sum::<i64>() == TARGET)
        .map(|combination| combination.into_iter().product())
        .ok_or_else(|| no_solution(anyhow!("no {} entries sum to {}", count, TARGET)))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        product_of_entries(shared, 2).map(|product| product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        product_of_entries(shared, 3).map(|product| product.to_string())
    }
}
