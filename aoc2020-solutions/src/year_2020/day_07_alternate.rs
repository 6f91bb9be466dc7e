//! Day 7: Handy Haversacks, regex parsing and reverse-edge search

use crate::utils::parse::{invalid, no_solution};
use anyhow::{anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::{HashMap, HashSet};

const TARGET: &str = "shiny gold";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, variant = "alternate", tags = ["graph", "regex"])]
pub struct Solver;

pub struct Graph<'a> {
    children: HashMap<&'a str, Vec<(&'a str, u64)>>,
    parents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Graph<'a> {
    /// Bags inside one `colour` bag; `path` holds the colours being expanded
    fn bags_inside(&self, colour: &'a str, path: &mut HashSet<&'a str>) -> anyhow::Result<u64> {
        if !path.insert(colour) {
            bail!("bag rules loop through {:?}", colour);
        }
        let mut total = 0u64;
        for &(child, count) in self.children.get(colour).into_iter().flatten() {
            let inside = self.bags_inside(child, path)?;
            total = inside
                .checked_add(1)
                .and_then(|bags| bags.checked_mul(count))
                .and_then(|bags| bags.checked_add(total))
                .ok_or_else(|| anyhow!("bag count inside {:?} overflows", colour))?;
        }
        path.remove(colour);
        Ok(total)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Graph<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rule_re = Regex::new(r"^(\w+ \w+) bags contain (.*)\.$").map_err(|e| invalid(e.into()))?;
        let item_re = Regex::new(r"(\d+) (\w+ \w+) bags?").map_err(|e| invalid(e.into()))?;

        let mut children = HashMap::new();
        let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
        for (idx, line) in input.trim().lines().enumerate() {
            let captures = rule_re
                .captures(line.trim())
                .ok_or_else(|| invalid(anyhow!("line {}: not a bag rule", idx + 1)))?;
            let (Some(colour), Some(contents)) = (captures.get(1), captures.get(2)) else {
                return Err(invalid(anyhow!("line {}: not a bag rule", idx + 1)));
            };

            let mut inner = Vec::new();
            for item in item_re.captures_iter(contents.as_str()) {
                let (_, [count, child]) = item.extract();
                let count: u64 = count
                    .parse()
                    .map_err(|e| invalid(anyhow!("line {}: {}", idx + 1, e)))?;
                inner.push((child, count));
                parents.entry(child).or_default().push(colour.as_str());
            }
            children.insert(colour.as_str(), inner);
        }

        Ok(Graph { children, parents })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut seen = HashSet::new();
        let mut stack = vec![TARGET];
        while let Some(colour) = stack.pop() {
            for &parent in shared.parents.get(colour).into_iter().flatten() {
                if seen.insert(parent) {
                    stack.push(parent);
                }
            }
        }
        if seen.contains(TARGET) {
            return Err(no_solution(anyhow!("{} bags contain themselves", TARGET)));
        }
        Ok(seen.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.children.contains_key(TARGET) {
            return Err(no_solution(anyhow!("no rule for {}", TARGET)));
        }
        let total = shared
            .bags_inside(TARGET, &mut HashSet::new())
            .map_err(no_solution)?;
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use crate::year_2020::day_07::tests::{EXAMPLE, NESTED};
    use indoc::indoc;

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "4");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "32");
        assert_eq!(solve::<Solver>(NESTED, 2), "126");
    }

    #[test]
    fn reverse_edges() {
        let graph = Solver::parse(EXAMPLE).unwrap();
        let mut parents = graph.parents["shiny gold"].clone();
        parents.sort();
        assert_eq!(parents, vec!["bright white", "muted yellow"]);
    }

    #[test]
    fn cyclic_rules_fail() {
        let mut graph = Solver::parse(indoc! {"
            shiny gold bags contain 1 dark red bag.
            dark red bags contain 1 shiny gold bag.
        "})
        .unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut graph).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut graph).is_err());
    }

    #[test]
    fn cycle_away_from_shiny_gold() {
        // the loop between red and orange never reaches inside shiny gold
        let mut graph = Solver::parse(indoc! {"
            dark red bags contain 1 dark orange bag, 2 shiny gold bags.
            dark orange bags contain 1 dark red bag.
            shiny gold bags contain 3 faded blue bags.
            faded blue bags contain no other bags.
        "})
        .unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut graph).unwrap(), "2");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut graph).unwrap(), "3");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Solver::parse("this is not a rule").is_err());
    }
}
