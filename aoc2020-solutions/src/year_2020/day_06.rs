//! Day 6: Custom Customs

use crate::utils::parse::{blocks, invalid};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["sets"])]
pub struct Solver;

/// One set of answered questions per person, grouped
type Groups = Vec<Vec<HashSet<char>>>;

impl AocParser for Solver {
    type SharedData<'a> = Groups;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        blocks(input)
            .map(|group| {
                group
                    .lines()
                    .map(|person| {
                        let person = person.trim();
                        match person.chars().find(|c| !c.is_ascii_lowercase()) {
                            Some(c) => Err(invalid(anyhow!("unexpected {:?} in {:?}", c, person))),
                            None => Ok(person.chars().collect()),
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .iter()
            .map(|group| group.iter().flatten().collect::<HashSet<_>>().len())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: usize = shared
            .iter()
            .map(|group| {
                let mut people = group.iter();
                let first = people.next().cloned().unwrap_or_default();
                people
                    .fold(first, |common, person| &common & person)
                    .len()
            })
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    pub(crate) const EXAMPLE: &str = indoc! {"
        abc

        a
        b
        c

        ab
        ac

        a
        a
        a
        a

        b
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "11");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "6");
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        let crlf = EXAMPLE.replace('\n', "\r\n");
        assert_eq!(solve::<Solver>(&crlf, 1), "11");
        assert_eq!(solve::<Solver>(&crlf, 2), "6");
    }

    #[test]
    fn uppercase_rejected() {
        assert!(Solver::parse("abC").is_err());
    }
}
