//! Day 10: Adapter Array

use crate::utils::memo::{Dense, Memo, Recurrence};
use crate::utils::parse::{invalid, no_solution, parse_lines};
use anyhow::anyhow;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["dp"])]
pub struct Solver;

/// Sorted joltages from the outlet (0) through the device (max + 3)
pub struct Chain {
    joltages: Vec<usize>,
}

impl Chain {
    fn device(&self) -> usize {
        self.joltages.last().copied().unwrap_or(0)
    }
}

/// Ways to reach each joltage from the outlet; `None` once the count overflows
struct Arrangements {
    present: Vec<bool>,
}

impl Recurrence for Arrangements {
    type Index = usize;
    type Value = Option<u128>;

    fn inputs(&self, joltage: &usize) -> Vec<usize> {
        (1..=3)
            .filter_map(|step| joltage.checked_sub(step))
            .filter(|&from| self.present[from])
            .collect()
    }

    fn combine(&self, joltage: &usize, inputs: Vec<Option<u128>>) -> Option<u128> {
        if *joltage == 0 {
            return Some(1);
        }
        inputs
            .into_iter()
            .try_fold(0u128, |total, ways| total.checked_add(ways?))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Chain;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut joltages = parse_lines(input, |line| Ok(line.parse::<usize>()?))?;
        joltages.sort_unstable();
        if joltages.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(invalid(anyhow!("adapter joltages must be distinct")));
        }
        if joltages.first() == Some(&0) {
            return Err(invalid(anyhow!("adapter joltages must be positive")));
        }

        let device = joltages.last().map_or(3, |max| max + 3);
        joltages.insert(0, 0);
        joltages.push(device);
        Ok(Chain { joltages })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut gaps = [0usize; 4];
        for pair in shared.joltages.windows(2) {
            let gap = pair[1] - pair[0];
            match gaps.get_mut(gap) {
                Some(count) => *count += 1,
                None => {
                    return Err(no_solution(anyhow!(
                        "gap of {} between {} and {}",
                        gap,
                        pair[0],
                        pair[1]
                    )));
                }
            }
        }
        Ok((gaps[1] * gaps[3]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let device = shared.device();
        let mut present = vec![false; device + 1];
        for &joltage in &shared.joltages {
            present[joltage] = true;
        }

        let memo = Memo::new(Arrangements { present }, Dense::with_capacity(device + 1));
        // bottom-up, so no lookup recurses more than one adapter deep
        for joltage in &shared.joltages {
            memo.get(joltage).map_err(no_solution)?;
        }
        let ways = memo
            .get(&device)
            .map_err(no_solution)?
            .ok_or_else(|| no_solution(anyhow!("arrangement count does not fit in 128 bits")))?;
        Ok(ways.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;

    const SMALL: &str = "16\n10\n15\n5\n1\n11\n7\n19\n6\n12\n4";
    const LARGE: &str = "28\n33\n18\n42\n31\n14\n46\n20\n48\n47\n24\n23\n49\n45\n19\n38\n39\n11\n1\n32\n25\n35\n8\n17\n7\n9\n4\n2\n34\n10\n3";

    #[test]
    fn small_example() {
        assert_eq!(solve::<Solver>(SMALL, 1), "35");
        assert_eq!(solve::<Solver>(SMALL, 2), "8");
    }

    #[test]
    fn large_example() {
        assert_eq!(solve::<Solver>(LARGE, 1), "220");
        assert_eq!(solve::<Solver>(LARGE, 2), "19208");
    }

    #[test]
    fn broken_chain() {
        let mut chain = Solver::parse("1\n9").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut chain).is_err());
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut chain).unwrap(), "0");
    }

    #[test]
    fn long_consecutive_chain() {
        let chain: String = (1..=100).map(|n| format!("{n}\n")).collect();
        assert_eq!(solve::<Solver>(&chain, 1), "100");
        assert_eq!(solve::<Solver>(&chain, 2), "180396380815100901214157639");

        let mut too_long = Solver::parse(&(1..=200).map(|n| format!("{n}\n")).collect::<String>()).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut too_long).is_err());
    }

    #[test]
    fn duplicates_rejected() {
        assert!(Solver::parse("1\n2\n2").is_err());
    }
}
