//! Day 6: Custom Customs, with answers as 26-bit masks

use crate::utils::parse::{blocks, invalid};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, variant = "alternate", tags = ["bitmask"])]
pub struct Solver;

fn answer_mask(person: &str) -> Result<u32, ParseError> {
    person.bytes().try_fold(0u32, |mask, b| match b {
        b'a'..=b'z' => Ok(mask | 1 << (b - b'a')),
        _ => Err(invalid(anyhow!("unexpected {:?} in {:?}", b as char, person))),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<u32>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        blocks(input)
            .map(|group| group.lines().map(|l| answer_mask(l.trim())).collect())
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(0, |acc, m| acc | m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = shared
            .iter()
            .map(|group| group.iter().fold(u32::MAX, |acc, m| acc & m).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use crate::year_2020::day_06::tests::EXAMPLE;

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "11");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "6");
    }

    #[test]
    fn masks() {
        assert_eq!(answer_mask("ac").unwrap(), 0b101);
        assert_eq!(answer_mask("").unwrap(), 0);
        assert!(answer_mask("a1").is_err());
    }

    #[test]
    fn agrees_with_main_solver() {
        let input = "abcx\nabcy\nabcz\n\nzyx\nxyz\n\nq";
        for part in 1..=2 {
            assert_eq!(
                solve::<Solver>(input, part),
                solve::<crate::year_2020::day_06::Solver>(input, part)
            );
        }
    }
}
