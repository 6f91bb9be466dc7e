//! Day 2: Password Philosophy

use crate::utils::parse::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug)]
pub struct Entry<'a> {
    lo: usize,
    hi: usize,
    letter: char,
    password: &'a str,
}

impl Entry<'_> {
    fn count_in_range(&self) -> bool {
        let count = self.password.chars().filter(|&c| c == self.letter).count();
        (self.lo..=self.hi).contains(&count)
    }

    fn exactly_one_position(&self) -> bool {
        let chars: Vec<char> = self.password.chars().collect();
        if chars.len() < self.hi {
            return false;
        }
        (chars[self.lo - 1] == self.letter) ^ (chars[self.hi - 1] == self.letter)
    }
}

fn parse_entry(line: &str) -> anyhow::Result<Entry<'_>> {
    let (policy, password) = line
        .split_once(": ")
        .ok_or_else(|| anyhow!("expected `<policy>: <password>`"))?;
    let (range, letter) = policy
        .split_once(' ')
        .ok_or_else(|| anyhow!("expected `<lo>-<hi> <letter>`"))?;
    let (lo, hi) = range
        .split_once('-')
        .ok_or_else(|| anyhow!("expected `<lo>-<hi>`"))?;
    let lo: usize = lo.parse().context("lower bound")?;
    let hi: usize = hi.parse().context("upper bound")?;

    let mut letters = letter.chars();
    let (Some(letter), None) = (letters.next(), letters.next()) else {
        bail!("policy letter must be a single character, got {:?}", letter);
    };
    if lo == 0 || lo > hi {
        bail!("invalid range {}-{}", lo, hi);
    }

    Ok(Entry {
        lo,
        hi,
        letter,
        password,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Entry<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_entry)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().filter(|e| e.count_in_range()).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|e| e.exactly_one_position())
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1-3 a: abcde
        1-3 b: cdefg
        2-9 c: ccccccccc
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "2");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "1");
    }

    #[test]
    fn short_password_never_counts_for_positions() {
        assert_eq!(solve::<Solver>("1-5 a: ab", 2), "0");
    }

    #[test]
    fn malformed_lines() {
        assert!(Solver::parse("1-3 ab: abc").is_err());
        assert!(Solver::parse("0-3 a: abc").is_err());
        assert!(Solver::parse("1-3 a abc").is_err());
    }
}
