//! Day 19: Monster Messages
//!
//! The rule set is transpiled into one anchored regex. Looping rules are
//! unrolled only as far as the longest message can reach: every rule knows
//! the shortest text it can match, and a branch whose shortest match no
//! longer fits the remaining length is dropped.

use crate::utils::parse::{blocks, no_solution, parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::RegexBuilder;
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 19, tags = ["parsing", "regex"])]
pub struct Solver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rule<'a> {
    Literal(&'a str),
    /// Sequences of rule ids, any of which may match
    Alternatives(Vec<Vec<usize>>),
}

pub struct Puzzle<'a> {
    pub(crate) rules: HashMap<usize, Rule<'a>>,
    pub(crate) messages: Vec<&'a str>,
}

impl<'a> Puzzle<'a> {
    /// Rules with 8 and 11 replaced by their looping forms
    pub(crate) fn with_loops(&self) -> Result<Puzzle<'a>, SolveError> {
        for needed in [42, 31] {
            if !self.rules.contains_key(&needed) {
                return Err(no_solution(anyhow!("looping rules refer to missing rule {}", needed)));
            }
        }
        let mut rules = self.rules.clone();
        rules.insert(8, Rule::Alternatives(vec![vec![42], vec![42, 8]]));
        rules.insert(11, Rule::Alternatives(vec![vec![42, 31], vec![42, 11, 31]]));
        Ok(Puzzle {
            rules,
            messages: self.messages.clone(),
        })
    }
}

fn parse_rule(line: &str) -> anyhow::Result<(usize, Rule<'_>)> {
    let (id, body) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("expected `id: body`"))?;
    let id = id.trim().parse::<usize>().context("rule id")?;
    let body = body.trim();

    if let Some(quoted) = body.strip_prefix('"') {
        let literal = quoted
            .strip_suffix('"')
            .ok_or_else(|| anyhow!("unterminated literal"))?;
        if literal.is_empty() {
            bail!("empty literal");
        }
        return Ok((id, Rule::Literal(literal)));
    }

    let alternatives = body
        .split('|')
        .map(|sequence| {
            let sequence = sequence
                .split_whitespace()
                .map(|r| r.parse::<usize>().with_context(|| format!("rule reference {:?}", r)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if sequence.is_empty() {
                bail!("empty alternative");
            }
            Ok(sequence)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((id, Rule::Alternatives(alternatives)))
}

pub(crate) fn parse_puzzle(input: &str) -> Result<Puzzle<'_>, ParseError> {
    let sections: Vec<&str> = blocks(input).collect();
    let [rule_block, message_block] = sections[..] else {
        return Err(ParseError::InvalidFormat(format!(
            "expected rules and messages, found {} blocks",
            sections.len()
        )));
    };

    let listed = parse_lines(rule_block, parse_rule)?;
    let count = listed.len();
    let rules: HashMap<usize, Rule> = listed.into_iter().collect();
    if rules.len() != count {
        return Err(ParseError::InvalidFormat("rule defined twice".into()));
    }
    if !rules.contains_key(&0) {
        return Err(ParseError::MissingData("rule 0".into()));
    }
    for (id, rule) in &rules {
        if let Rule::Alternatives(alternatives) = rule {
            if let Some(missing) = alternatives.iter().flatten().find(|&&r| !rules.contains_key(&r)) {
                return Err(ParseError::InvalidFormat(format!(
                    "rule {} refers to missing rule {}",
                    id, missing
                )));
            }
        }
    }

    let messages = message_block
        .lines()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect();
    Ok(Puzzle { rules, messages })
}

/// Shortest text each rule can match; rules that can never finish are absent
fn min_lengths(rules: &HashMap<usize, Rule<'_>>) -> HashMap<usize, usize> {
    let mut known: HashMap<usize, usize> = HashMap::new();
    loop {
        let mut changed = false;
        for (&id, rule) in rules {
            let shortest = match rule {
                Rule::Literal(text) => Some(text.len()),
                Rule::Alternatives(alternatives) => alternatives
                    .iter()
                    .filter_map(|seq| seq.iter().map(|r| known.get(r).copied()).sum::<Option<usize>>())
                    .min(),
            };
            if let Some(len) = shortest {
                if known.get(&id).is_none_or(|&old| len < old) {
                    known.insert(id, len);
                    changed = true;
                }
            }
        }
        if !changed {
            return known;
        }
    }
}

struct Transpiler<'r, 'a> {
    rules: &'r HashMap<usize, Rule<'a>>,
    min_len: HashMap<usize, usize>,
    memo: HashMap<(usize, usize), Option<String>>,
    in_progress: HashSet<(usize, usize)>,
    cycle_hits: usize,
}

impl<'r, 'a> Transpiler<'r, 'a> {
    fn new(rules: &'r HashMap<usize, Rule<'a>>) -> Self {
        Self {
            rules,
            min_len: min_lengths(rules),
            memo: HashMap::new(),
            in_progress: HashSet::new(),
            cycle_hits: 0,
        }
    }

    /// Regex for rule `id` restricted to matches of at most `budget` bytes,
    /// or `None` when nothing that short can match
    fn pattern(&mut self, id: usize, budget: usize) -> Option<String> {
        let rules = self.rules;
        let rule = rules.get(&id)?;
        if *self.min_len.get(&id)? > budget {
            return None;
        }
        if let Some(done) = self.memo.get(&(id, budget)) {
            return done.clone();
        }
        // a rule reached again at the same budget adds nothing new
        if !self.in_progress.insert((id, budget)) {
            self.cycle_hits += 1;
            return None;
        }
        let hits_before = self.cycle_hits;

        let result = match rule {
            Rule::Literal(text) => Some(regex::escape(text)),
            Rule::Alternatives(alternatives) => {
                let mut branches: Vec<String> = alternatives
                    .iter()
                    .filter_map(|seq| self.sequence(seq, budget))
                    .collect();
                match branches.len() {
                    0 => None,
                    1 => branches.pop(),
                    _ => Some(format!("(?:{})", branches.join("|"))),
                }
            }
        };

        self.in_progress.remove(&(id, budget));
        if self.cycle_hits == hits_before {
            self.memo.insert((id, budget), result.clone());
        }
        result
    }

    fn sequence(&mut self, sequence: &[usize], budget: usize) -> Option<String> {
        let mins = sequence
            .iter()
            .map(|r| self.min_len.get(r).copied())
            .collect::<Option<Vec<usize>>>()?;
        let total: usize = mins.iter().sum();
        if total > budget {
            return None;
        }
        sequence
            .iter()
            .zip(&mins)
            .map(|(&r, &min)| self.pattern(r, budget - (total - min)))
            .collect()
    }
}

fn count_matches(puzzle: &Puzzle<'_>) -> Result<usize, SolveError> {
    let budget = puzzle.messages.iter().map(|m| m.len()).max().unwrap_or(0);
    let mut transpiler = Transpiler::new(&puzzle.rules);
    let Some(body) = transpiler.pattern(0, budget) else {
        return Ok(0);
    };
    tracing::debug!(budget, pattern_len = body.len(), "rule 0 transpiled");

    let regex = RegexBuilder::new(&format!("^(?:{})$", body))
        .size_limit(1 << 28)
        .nest_limit(1024)
        .build()
        .map_err(|e| no_solution(e.into()))?;
    Ok(puzzle.messages.iter().filter(|m| regex.is_match(m)).count())
}

impl AocParser for Solver {
    type SharedData<'a> = Puzzle<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_puzzle(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(shared)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_matches(&shared.with_loops()?)?.to_string())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    pub(crate) const SIMPLE: &str = indoc! {r#"
        0: 4 1 5
        1: 2 3 | 3 2
        2: 4 4 | 5 5
        3: 4 5 | 5 4
        4: "a"
        5: "b"

        ababbb
        bababa
        abbbab
        aaabbb
        aaaabbb
    "#};

    pub(crate) const LOOPING: &str = indoc! {r#"
        42: 9 14 | 10 1
        9: 14 27 | 1 26
        10: 23 14 | 28 1
        1: "a"
        11: 42 31
        5: 1 14 | 15 1
        19: 14 1 | 14 14
        12: 24 14 | 19 1
        16: 15 1 | 14 14
        31: 14 17 | 1 13
        6: 14 14 | 1 14
        2: 1 24 | 14 4
        0: 8 11
        13: 14 3 | 1 12
        15: 1 | 14
        17: 14 2 | 1 7
        23: 25 1 | 22 14
        28: 16 1
        4: 1 1
        20: 14 14 | 1 15
        3: 5 14 | 16 1
        27: 1 6 | 14 18
        14: "b"
        21: 14 1 | 1 14
        25: 1 1 | 1 14
        22: 14 14
        8: 42
        26: 14 22 | 1 20
        18: 15 15
        7: 14 5 | 1 21
        24: 14 1

        abbbbbabbbaaaababbaabbbbabababbbabbbbbbabaaaa
        bbabbbbaabaabba
        babbbbaabbbbbabbbbbbaabaaabaaa
        aaabbbbbbaaaabaababaabababbabaaabbababababaaa
        bbbbbbbaaaabbbbaaabbabaaa
        bbbababbbbaaaaaaaabbababaaababaabab
        ababaaaaaabaaab
        ababaaaaabbbaba
        baabbaaaabbaaaababbaababb
        abbbbabbbbaaaababbbbbbaaaababb
        aaaaabbaabaaaaababaa
        aaaabbaaaabbaaa
        aaaabbaabbaaaaaaabbbabbbaaabbaabaaa
        babaaabbbaaabaababbaabababaaab
        aabbbbbaabbbaaaaaabbbbbababaaaaabbaaabba
    "#};

    #[test]
    fn simple_rules() {
        assert_eq!(solve::<Solver>(SIMPLE, 1), "2");
    }

    #[test]
    fn looping_rules() {
        assert_eq!(solve::<Solver>(LOOPING, 1), "3");
        assert_eq!(solve::<Solver>(LOOPING, 2), "12");
    }

    #[test]
    fn shortest_matches() {
        let puzzle = parse_puzzle(SIMPLE).unwrap();
        let lengths = min_lengths(&puzzle.rules);
        assert_eq!(lengths[&4], 1);
        assert_eq!(lengths[&2], 2);
        assert_eq!(lengths[&1], 4);
        assert_eq!(lengths[&0], 6);
    }

    #[test]
    fn rule_without_base_case_never_matches() {
        let input = indoc! {r#"
            0: 1 | 2
            1: 2 1
            2: "a"

            a
            aa
        "#};
        let puzzle = parse_puzzle(input).unwrap();
        assert!(!min_lengths(&puzzle.rules).contains_key(&1));
        assert_eq!(solve::<Solver>(input, 1), "1");
    }

    #[test]
    fn unit_cycle_terminates() {
        let input = indoc! {r#"
            0: 1 | 2
            1: 0 | 2
            2: "a"

            a
            b
        "#};
        assert_eq!(solve::<Solver>(input, 1), "1");
    }

    #[test]
    fn malformed_rules() {
        assert!(parse_puzzle("0: 1\n\na").is_err());
        assert!(parse_puzzle("1: \"a\"\n\na").is_err());
        assert!(parse_puzzle("0: \"\"\n\na").is_err());
        assert!(parse_puzzle("0: \"a\"\n0: \"b\"\n\na").is_err());
        assert!(parse_puzzle("0: \"a\"").is_err());
    }

    #[test]
    fn loops_need_rules_42_and_31() {
        let mut puzzle = parse_puzzle(SIMPLE).unwrap();
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut puzzle),
            Err(SolveError::SolveFailed(_))
        ));
    }
}
