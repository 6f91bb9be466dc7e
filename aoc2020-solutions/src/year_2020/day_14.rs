//! Day 14: Docking Data

use crate::utils::parse::{invalid, parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::HashMap;

const WIDTH: usize = 36;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 14, tags = ["bitmask", "regex"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mask {
    ones: u64,
    floating: u64,
}

impl Mask {
    fn parse(bits: &str) -> anyhow::Result<Self> {
        if bits.len() != WIDTH {
            bail!("mask must have {} bits, got {}", WIDTH, bits.len());
        }
        bits.chars().try_fold(Mask::default(), |mask, c| {
            let (one, float) = match c {
                '0' => (0, 0),
                '1' => (1, 0),
                'X' => (0, 1),
                other => bail!("unexpected {:?} in mask", other),
            };
            Ok(Mask {
                ones: mask.ones << 1 | one,
                floating: mask.floating << 1 | float,
            })
        })
    }

    /// X keeps the value bit, 0 and 1 overwrite it
    fn apply_to_value(&self, value: u64) -> u64 {
        value & self.floating | self.ones
    }

    /// Every address the mask decodes `address` to
    fn addresses(&self, address: u64) -> impl Iterator<Item = u64> + use<> {
        let base = (address | self.ones) & !self.floating;
        let floating = self.floating;
        // subsets of the floating bits, from all set down to none
        let mut next = Some(floating);
        std::iter::from_fn(move || {
            let subset = next?;
            next = (subset != 0).then(|| (subset - 1) & floating);
            Some(base | subset)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    SetMask(Mask),
    Write { address: u64, value: u64 },
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let line_re =
            Regex::new(r"^(mask|mem)(?:\[(\d+)\])? = (.+)$").map_err(|e| invalid(e.into()))?;

        parse_lines(input, |line| {
            let captures = line_re
                .captures(line)
                .ok_or_else(|| anyhow!("expected `mask = ...` or `mem[..] = ...`"))?;
            let value = &captures[3];
            match (&captures[1], captures.get(2)) {
                ("mask", None) => Ok(Instruction::SetMask(Mask::parse(value)?)),
                ("mem", Some(address)) => Ok(Instruction::Write {
                    address: address.as_str().parse().context("address")?,
                    value: value.parse().context("value")?,
                }),
                _ => bail!("malformed instruction"),
            }
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = HashMap::new();
        let mut mask = Mask::default();
        for instruction in shared.iter() {
            match *instruction {
                Instruction::SetMask(m) => mask = m,
                Instruction::Write { address, value } => {
                    memory.insert(address, mask.apply_to_value(value));
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut memory = HashMap::new();
        let mut mask = Mask::default();
        for instruction in shared.iter() {
            match *instruction {
                Instruction::SetMask(m) => mask = m,
                Instruction::Write { address, value } => {
                    for decoded in mask.addresses(address) {
                        memory.insert(decoded, value);
                    }
                }
            }
        }
        Ok(memory.values().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    #[test]
    fn value_masking() {
        let input = indoc! {"
            mask = XXXXXXXXXXXXXXXXXXXXXXXXXXXXX1XXXX0X
            mem[8] = 11
            mem[7] = 101
            mem[8] = 0
        "};
        assert_eq!(solve::<Solver>(input, 1), "165");
    }

    #[test]
    fn address_decoding() {
        let input = indoc! {"
            mask = 000000000000000000000000000000X1001X
            mem[42] = 100
            mask = 00000000000000000000000000000000X0XX
            mem[26] = 1
        "};
        assert_eq!(solve::<Solver>(input, 2), "208");
    }

    #[test]
    fn floating_addresses() {
        let mask = Mask::parse("000000000000000000000000000000X1001X").unwrap();
        let mut addresses: Vec<_> = mask.addresses(42).collect();
        addresses.sort_unstable();
        assert_eq!(addresses, vec![26, 27, 58, 59]);
    }

    #[test]
    fn malformed() {
        assert!(Solver::parse("mask = 1X0").is_err());
        assert!(Solver::parse("mem = 5").is_err());
        assert!(Solver::parse("mask[3] = 000000000000000000000000000000000000").is_err());
    }
}
