//! Day 15: Rambunctious Recitation

use crate::utils::parse::invalid;
use anyhow::{Context, anyhow};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["simulation"])]
pub struct Solver;

/// The `turn`th number spoken in the game (1-based)
fn spoken(starting: &[u32], turn: u32) -> u32 {
    let Some((&last_start, earlier)) = starting.split_last() else {
        return 0;
    };
    if let Some(&number) = starting.get(turn as usize - 1) {
        return number;
    }

    // every number spoken after the starting ones is an age, so below `turn`;
    // larger starting numbers are never looked up again and are not recorded
    let mut last_seen = vec![0u32; turn as usize];
    for (idx, &number) in starting.iter().enumerate() {
        if let Some(seen) = last_seen.get_mut(number as usize) {
            *seen = idx as u32 + 1;
        }
    }

    let said = starting.len() as u32;
    let mut current = match earlier.iter().rposition(|&n| n == last_start) {
        Some(idx) => said - (idx as u32 + 1),
        None => 0,
    };
    for t in said + 1..turn {
        let previous = std::mem::replace(&mut last_seen[current as usize], t);
        current = if previous == 0 { 0 } else { t - previous };
    }
    current
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .trim()
            .split(',')
            .map(|word| {
                word.trim()
                    .parse::<u32>()
                    .with_context(|| format!("starting number {:?}", word))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(invalid)?;
        if numbers.is_empty() {
            return Err(invalid(anyhow!("no starting numbers")));
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(spoken(shared, 2020).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(spoken(shared, 30_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;

    #[test]
    fn first_turns() {
        let spoken: Vec<u32> = (1..=10).map(|t| spoken(&[0, 3, 6], t)).collect();
        assert_eq!(spoken, vec![0, 3, 6, 0, 3, 3, 1, 0, 4, 0]);
    }

    #[test]
    fn examples() {
        for (start, expected) in [
            ("0,3,6", 436),
            ("1,3,2", 1),
            ("2,1,3", 10),
            ("1,2,3", 27),
            ("2,3,1", 78),
            ("3,2,1", 438),
            ("3,1,2", 1836),
        ] {
            assert_eq!(solve::<Solver>(start, 1), expected.to_string(), "{}", start);
        }
    }

    #[test]
    fn long_game() {
        assert_eq!(solve::<Solver>("0,3,6", 2), "175594");
    }

    #[test]
    fn repeated_starting_number() {
        // 1,1: turn 3 is 1 (spoken one turn apart), turn 4 is 1 again
        assert_eq!(spoken(&[1, 1], 3), 1);
        assert_eq!(spoken(&[1, 1], 4), 1);
    }

    #[test]
    fn huge_starting_numbers() {
        let huge = u32::MAX - 1;
        assert_eq!(spoken(&[0, 3, huge], 4), 0);
        assert_eq!(spoken(&[0, 3, huge], 5), 3);
        assert_eq!(spoken(&[huge, huge], 3), 1);
        assert_eq!(spoken(&[huge, huge], 4), 0);
        assert_eq!(solve::<Solver>(&format!("{huge},{huge}"), 1), "653");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Solver::parse("1,,2").is_err());
        assert!(Solver::parse("").is_err());
    }
}
