//! Day 7: Handy Haversacks

use crate::utils::memo::{Memo, Recurrence, Sparse};
use crate::utils::parse::{invalid, no_solution, parse_lines};
use anyhow::{Context, anyhow};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

const SHINY_GOLD: &str = "shiny gold";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["graph", "dp"])]
pub struct Solver;

/// Bag colour to the (count, colour) pairs it must directly contain
pub type BagRules<'a> = HashMap<&'a str, Vec<(u64, &'a str)>>;

/// `<n> <adjective> <colour> bag(s)`
fn parse_item(item: &str) -> anyhow::Result<(u64, &str)> {
    let (item, _bags) = item
        .rsplit_once(' ')
        .ok_or_else(|| anyhow!("incomplete item {:?}", item))?;
    let (count, colour) = item
        .split_once(' ')
        .ok_or_else(|| anyhow!("item {:?} has no colour", item))?;
    let count = count
        .parse::<u64>()
        .with_context(|| format!("bag count in {:?}", item))?;
    Ok((count, colour))
}

fn parse_rule(line: &str) -> anyhow::Result<(&str, Vec<(u64, &str)>)> {
    let (outer, contents) = line
        .split_once(" bags contain ")
        .ok_or_else(|| anyhow!("expected `<colour> bags contain ...`"))?;
    let contents = contents.trim_end_matches('.');
    if contents == "no other bags" {
        return Ok((outer, Vec::new()));
    }

    let inner = contents
        .split(", ")
        .map(parse_item)
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((outer, inner))
}

fn contents<'a>(rules: &BagRules<'a>, colour: &str) -> Vec<&'a str> {
    rules
        .get(colour)
        .map(|inner| inner.iter().map(|&(_, c)| c).collect())
        .unwrap_or_default()
}

/// Whether a bag of the given colour holds a shiny gold bag at any depth
struct ContainsGold<'r, 'a>(&'r BagRules<'a>);

impl<'a> Recurrence for ContainsGold<'_, 'a> {
    type Index = &'a str;
    type Value = bool;

    fn inputs(&self, colour: &&'a str) -> Vec<&'a str> {
        contents(self.0, colour)
    }

    fn combine(&self, colour: &&'a str, inputs: Vec<bool>) -> bool {
        self.0.get(colour).is_some_and(|inner| {
            inner
                .iter()
                .zip(inputs)
                .any(|(&(_, c), contains)| c == SHINY_GOLD || contains)
        })
    }
}

/// Total bags inside a bag of the given colour
struct BagsInside<'r, 'a>(&'r BagRules<'a>);

impl<'a> Recurrence for BagsInside<'_, 'a> {
    type Index = &'a str;
    type Value = u64;

    fn inputs(&self, colour: &&'a str) -> Vec<&'a str> {
        contents(self.0, colour)
    }

    fn combine(&self, colour: &&'a str, inputs: Vec<u64>) -> u64 {
        self.0.get(colour).map_or(0, |inner| {
            inner
                .iter()
                .zip(inputs)
                .map(|(&(count, _), inside)| count * (1 + inside))
                .sum()
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = BagRules<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rules = parse_lines(input, parse_rule)?;
        let mut map = HashMap::with_capacity(rules.len());
        for (outer, inner) in rules {
            if map.insert(outer, inner).is_some() {
                return Err(invalid(anyhow!("duplicate rule for {:?}", outer)));
            }
        }
        Ok(map)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let memo = Memo::new(ContainsGold(shared), Sparse::new());
        let mut count = 0;
        for colour in shared.keys() {
            if memo.get(colour).map_err(no_solution)? {
                count += 1;
            }
        }
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.contains_key(SHINY_GOLD) {
            return Err(no_solution(anyhow!("no rule for {}", SHINY_GOLD)));
        }
        let memo = Memo::new(BagsInside(shared), Sparse::new());
        let total = memo.get(&SHINY_GOLD).map_err(no_solution)?;
        Ok(total.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    pub(crate) const EXAMPLE: &str = indoc! {"
        light red bags contain 1 bright white bag, 2 muted yellow bags.
        dark orange bags contain 3 bright white bags, 4 muted yellow bags.
        bright white bags contain 1 shiny gold bag.
        muted yellow bags contain 2 shiny gold bags, 9 faded blue bags.
        shiny gold bags contain 1 dark olive bag, 2 vibrant plum bags.
        dark olive bags contain 3 faded blue bags, 4 dotted black bags.
        vibrant plum bags contain 5 faded blue bags, 6 dotted black bags.
        faded blue bags contain no other bags.
        dotted black bags contain no other bags.
    "};

    pub(crate) const NESTED: &str = indoc! {"
        shiny gold bags contain 2 dark red bags.
        dark red bags contain 2 dark orange bags.
        dark orange bags contain 2 dark yellow bags.
        dark yellow bags contain 2 dark green bags.
        dark green bags contain 2 dark blue bags.
        dark blue bags contain 2 dark violet bags.
        dark violet bags contain no other bags.
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "4");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "32");
        assert_eq!(solve::<Solver>(NESTED, 2), "126");
    }

    #[test]
    fn parses_singular_and_plural() {
        let (outer, inner) = parse_rule("dark orange bags contain 3 bright white bags, 1 muted yellow bag.").unwrap();
        assert_eq!(outer, "dark orange");
        assert_eq!(inner, vec![(3, "bright white"), (1, "muted yellow")]);

        let (_, inner) = parse_rule("faded blue bags contain no other bags.").unwrap();
        assert!(inner.is_empty());

        assert!(parse_rule("faded blue bags hold things").is_err());
        assert!(parse_rule("red bags contain x bright white bags.").is_err());
    }

    #[test]
    fn cyclic_rules_fail() {
        let mut shared = Solver::parse(indoc! {"
            shiny gold bags contain 1 dark red bag.
            dark red bags contain 2 shiny gold bags.
        "})
        .unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }

    #[test]
    fn missing_shiny_gold() {
        let mut shared = Solver::parse("faded blue bags contain no other bags.").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "0");
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }
}
