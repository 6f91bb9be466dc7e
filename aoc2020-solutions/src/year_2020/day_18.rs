//! Day 18: Operation Order

use crate::utils::parse::parse_lines;
use anyhow::bail;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::iter::Peekable;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["parsing", "expressions"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(u64),
    Add,
    Mul,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Number(u64),
    Group(Chain),
}

/// Terms joined by operators; `terms.len() == ops.len() + 1`
///
/// Precedence is decided at evaluation time, so both parts share one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    terms: Vec<Term>,
    ops: Vec<Op>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precedence {
    /// Strictly left to right
    Flat,
    /// `+` before `*`
    AdditionFirst,
}

impl Chain {
    fn eval(&self, precedence: Precedence) -> u64 {
        let mut values = self.terms.iter().map(|term| match term {
            Term::Number(n) => *n,
            Term::Group(chain) => chain.eval(precedence),
        });
        let first = values.next().unwrap_or(0);

        match precedence {
            Precedence::Flat => self.ops.iter().zip(values).fold(first, |acc, (op, v)| match op {
                Op::Add => acc + v,
                Op::Mul => acc * v,
            }),
            Precedence::AdditionFirst => {
                let (product, sum) =
                    self.ops
                        .iter()
                        .zip(values)
                        .fold((1, first), |(product, sum), (op, v)| match op {
                            Op::Add => (product, sum + v),
                            Op::Mul => (product * sum, v),
                        });
                product * sum
            }
        }
    }
}

fn tokenize(line: &str) -> anyhow::Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        tokens.push(match c {
            ' ' => continue,
            '+' => Token::Add,
            '*' => Token::Mul,
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' => {
                let mut end = start + 1;
                while let Some(&(idx, '0'..='9')) = chars.peek() {
                    end = idx + 1;
                    chars.next();
                }
                Token::Number(line[start..end].parse()?)
            }
            other => bail!("unexpected {:?} at column {}", other, start + 1),
        });
    }
    Ok(tokens)
}

fn parse_chain(tokens: &mut Peekable<impl Iterator<Item = Token>>) -> anyhow::Result<Chain> {
    let mut terms = vec![parse_term(tokens)?];
    let mut ops = Vec::new();
    while let Some(&token) = tokens.peek() {
        let op = match token {
            Token::Add => Op::Add,
            Token::Mul => Op::Mul,
            Token::Close => break,
            other => bail!("expected an operator, found {:?}", other),
        };
        tokens.next();
        ops.push(op);
        terms.push(parse_term(tokens)?);
    }
    Ok(Chain { terms, ops })
}

fn parse_term(tokens: &mut Peekable<impl Iterator<Item = Token>>) -> anyhow::Result<Term> {
    match tokens.next() {
        Some(Token::Number(n)) => Ok(Term::Number(n)),
        Some(Token::Open) => {
            let chain = parse_chain(tokens)?;
            match tokens.next() {
                Some(Token::Close) => Ok(Term::Group(chain)),
                _ => bail!("unclosed parenthesis"),
            }
        }
        Some(other) => bail!("expected a number or `(`, found {:?}", other),
        None => bail!("unexpected end of expression"),
    }
}

fn parse_expression(line: &str) -> anyhow::Result<Chain> {
    let mut tokens = tokenize(line)?.into_iter().peekable();
    let chain = parse_chain(&mut tokens)?;
    if tokens.next().is_some() {
        bail!("unmatched `)`");
    }
    Ok(chain)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Chain>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_expression)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|e| e.eval(Precedence::Flat)).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().map(|e| e.eval(Precedence::AdditionFirst)).sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;

    const EXAMPLES: [(&str, u64, u64); 6] = [
        ("1 + 2 * 3 + 4 * 5 + 6", 71, 231),
        ("1 + (2 * 3) + (4 * (5 + 6))", 51, 51),
        ("2 * 3 + (4 * 5)", 26, 46),
        ("5 + (8 * 3 + 9 + 3 * 4 * 3)", 437, 1445),
        ("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))", 12240, 669060),
        ("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2", 13632, 23340),
    ];

    #[test]
    fn each_example() {
        for (expression, flat, addition_first) in EXAMPLES {
            let chain = parse_expression(expression).unwrap();
            assert_eq!(chain.eval(Precedence::Flat), flat, "{}", expression);
            assert_eq!(chain.eval(Precedence::AdditionFirst), addition_first, "{}", expression);
        }
    }

    #[test]
    fn sums_over_lines() {
        let input = EXAMPLES.map(|(e, _, _)| e).join("\n");
        let flat: u64 = EXAMPLES.iter().map(|(_, f, _)| f).sum();
        let addition_first: u64 = EXAMPLES.iter().map(|(_, _, a)| a).sum();
        assert_eq!(solve::<Solver>(&input, 1), flat.to_string());
        assert_eq!(solve::<Solver>(&input, 2), addition_first.to_string());
    }

    #[test]
    fn multi_digit_numbers() {
        assert_eq!(parse_expression("12 + 30").unwrap().eval(Precedence::Flat), 42);
    }

    #[test]
    fn malformed_expressions() {
        for bad in ["(1 + 2", "1 + 2)", "1 +", "1 2", "* 3", "1 - 2"] {
            assert!(parse_expression(bad).is_err(), "{}", bad);
        }
    }
}
