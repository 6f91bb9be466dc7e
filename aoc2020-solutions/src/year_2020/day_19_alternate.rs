//! Day 19: Monster Messages, matched directly against the rules
//!
//! Matching a rule yields every remainder the text could leave behind, so
//! ambiguous and looping rules need no special handling.

use super::day_19::{Puzzle, Rule, parse_puzzle};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, variant = "alternate", tags = ["parsing", "recursion"])]
pub struct Solver;

struct Matcher<'r, 'a> {
    rules: &'r HashMap<usize, Rule<'a>>,
    /// Deeper than this, the recursion has looped without consuming input
    depth_limit: usize,
}

impl Matcher<'_, '_> {
    fn remainders<'m>(&self, id: usize, text: &'m str, depth: usize) -> Vec<&'m str> {
        // every rule consumes at least one character
        if text.is_empty() || depth > self.depth_limit {
            return Vec::new();
        }
        match self.rules.get(&id) {
            None => Vec::new(),
            Some(Rule::Literal(literal)) => text.strip_prefix(*literal).into_iter().collect(),
            Some(Rule::Alternatives(alternatives)) => alternatives
                .iter()
                .flat_map(|sequence| {
                    sequence.iter().fold(vec![text], |current, &next| {
                        current
                            .into_iter()
                            .flat_map(|rest| self.remainders(next, rest, depth + 1))
                            .collect()
                    })
                })
                .collect(),
        }
    }

    fn matches(&self, message: &str) -> bool {
        self.remainders(0, message, 0).contains(&"")
    }
}

fn count_matches(puzzle: &Puzzle<'_>) -> usize {
    let longest = puzzle.messages.iter().map(|m| m.len()).max().unwrap_or(0);
    let matcher = Matcher {
        rules: &puzzle.rules,
        depth_limit: puzzle.rules.len() * (longest + 1),
    };
    puzzle.messages.iter().filter(|m| matcher.matches(m)).count()
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_puzzle(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(&shared.with_loops()?).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use crate::year_2020::day_19::tests::{LOOPING, SIMPLE};
    use indoc::indoc;

    #[test]
    fn agrees_with_regex_solver() {
        assert_eq!(solve::<Solver>(SIMPLE, 1), "2");
        assert_eq!(solve::<Solver>(LOOPING, 1), "3");
        assert_eq!(solve::<Solver>(LOOPING, 2), "12");
    }

    #[test]
    fn backtracks_through_ambiguous_prefixes() {
        // rule 0 must try both lengths of rule 1 to finish on "b"
        let input = indoc! {r#"
            0: 1 2
            1: 3 | 3 3
            2: "b"
            3: "a"

            ab
            aab
            aaab
        "#};
        assert_eq!(solve::<Solver>(input, 1), "2");
    }

    #[test]
    fn left_recursion_is_cut_off() {
        let input = indoc! {r#"
            0: 0 1 | 1
            1: "a"

            a
            aaa
            b
        "#};
        assert_eq!(solve::<Solver>(input, 1), "2");
    }
}
