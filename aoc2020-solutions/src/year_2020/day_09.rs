//! Day 9: Encoding Error

use crate::utils::parse::{no_solution, parse_lines};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

const PREAMBLE: usize = 25;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["sliding-window"])]
pub struct Solver;

#[derive(Debug)]
pub struct Xmas {
    numbers: Vec<u64>,
    preamble: usize,
    /// Part 1 answer, reused by part 2
    invalid: Option<u64>,
}

impl Xmas {
    pub fn new(numbers: Vec<u64>, preamble: usize) -> Self {
        Self {
            numbers,
            preamble,
            invalid: None,
        }
    }

    /// First number that is not the sum of two of the `preamble` numbers before it
    fn first_invalid(&mut self) -> Result<u64, SolveError> {
        if let Some(invalid) = self.invalid {
            return Ok(invalid);
        }
        let preamble = self.preamble;
        let found = self
            .numbers
            .windows(preamble + 1)
            .map(|window| (window[preamble], &window[..preamble]))
            .find(|(target, previous)| {
                !previous
                    .iter()
                    .tuple_combinations()
                    .any(|(a, b)| a + b == *target)
            })
            .map(|(target, _)| target)
            .ok_or_else(|| no_solution(anyhow!("every number is a sum of two predecessors")))?;
        self.invalid = Some(found);
        Ok(found)
    }
}

/// Contiguous run of at least two numbers adding up to `target`
fn contiguous_run(numbers: &[u64], target: u64) -> Option<&[u64]> {
    let mut lo = 0;
    let mut sum = 0;
    for hi in 0..numbers.len() {
        sum += numbers[hi];
        while sum > target && lo < hi {
            sum -= numbers[lo];
            lo += 1;
        }
        if sum == target && hi > lo {
            return Some(&numbers[lo..=hi]);
        }
    }
    None
}

impl AocParser for Solver {
    type SharedData<'a> = Xmas;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = parse_lines(input, |line| Ok(line.parse::<u64>()?))?;
        Ok(Xmas::new(numbers, PREAMBLE))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared.first_invalid().map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let target = shared.first_invalid()?;
        let run = contiguous_run(&shared.numbers, target)
            .ok_or_else(|| no_solution(anyhow!("no contiguous run sums to {}", target)))?;
        let (min, max) = run
            .iter()
            .minmax()
            .into_option()
            .ok_or_else(|| no_solution(anyhow!("empty run")))?;
        Ok((min + max).to_string())
    }
}
