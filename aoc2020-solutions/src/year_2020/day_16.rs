//! Day 16: Ticket Translation

use crate::utils::parse::{blocks, invalid, no_solution, parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 16, tags = ["parsing", "constraints"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Field<'a> {
    name: &'a str,
    ranges: [RangeInclusive<u64>; 2],
}

impl Field<'_> {
    fn accepts(&self, value: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

pub struct Notes<'a> {
    fields: Vec<Field<'a>>,
    mine: Vec<u64>,
    nearby: Vec<Vec<u64>>,
}

impl Notes<'_> {
    fn accepted_by_any(&self, value: u64) -> bool {
        self.fields.iter().any(|field| field.accepts(value))
    }

    /// Column of each field, where elimination could pin it down
    fn resolve_columns(&self) -> Vec<Option<usize>> {
        let valid: Vec<&Vec<u64>> = std::iter::once(&self.mine)
            .chain(self.nearby.iter())
            .filter(|ticket| ticket.iter().all(|&v| self.accepted_by_any(v)))
            .collect();
        let columns = self.mine.len();

        let mut candidates: Vec<Vec<usize>> = self
            .fields
            .iter()
            .map(|field| {
                (0..columns)
                    .filter(|&col| valid.iter().all(|ticket| field.accepts(ticket[col])))
                    .collect()
            })
            .collect();
        let mut resolved = vec![None; self.fields.len()];

        while let Some(field) = candidates.iter().position(|cols| cols.len() == 1) {
            let column = candidates[field][0];
            tracing::debug!(field = self.fields[field].name, column, "field resolved");
            resolved[field] = Some(column);
            for cols in candidates.iter_mut() {
                cols.retain(|&c| c != column);
            }
        }
        resolved
    }
}

fn parse_field(line: &str) -> anyhow::Result<Field<'_>> {
    let (name, ranges) = line
        .split_once(": ")
        .ok_or_else(|| anyhow!("expected `name: a-b or c-d`"))?;
    let (first, second) = ranges
        .split_once(" or ")
        .ok_or_else(|| anyhow!("expected two ranges"))?;
    let range = |text: &str| -> anyhow::Result<RangeInclusive<u64>> {
        let (lo, hi) = text
            .split_once('-')
            .ok_or_else(|| anyhow!("range {:?} lacks `-`", text))?;
        Ok(lo.parse()?..=hi.parse()?)
    };
    Ok(Field {
        name,
        ranges: [range(first)?, range(second)?],
    })
}

fn parse_tickets(block: &str, header: &str) -> anyhow::Result<Vec<Vec<u64>>> {
    let mut lines = block.lines();
    if lines.next().map(str::trim) != Some(header) {
        bail!("expected block to start with {:?}", header);
    }
    lines
        .map(|line| {
            line.trim()
                .split(',')
                .map(|v| v.parse::<u64>().with_context(|| format!("ticket value {:?}", v)))
                .collect()
        })
        .collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Notes<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections: Vec<&str> = blocks(input).collect();
        let [rules, mine, nearby] = sections[..] else {
            return Err(ParseError::InvalidFormat(format!(
                "expected 3 blocks, found {}",
                sections.len()
            )));
        };

        let fields = parse_lines(rules, parse_field)?;
        let mine = parse_tickets(mine, "your ticket:")
            .map_err(invalid)?
            .pop()
            .ok_or_else(|| ParseError::MissingData("your ticket".into()))?;
        let nearby = parse_tickets(nearby, "nearby tickets:").map_err(invalid)?;

        if mine.len() != fields.len() || nearby.iter().any(|t| t.len() != fields.len()) {
            return Err(invalid(anyhow!(
                "every ticket must hold {} values",
                fields.len()
            )));
        }
        Ok(Notes {
            fields,
            mine,
            nearby,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let error_rate: u64 = shared
            .nearby
            .iter()
            .flatten()
            .filter(|&&v| !shared.accepted_by_any(v))
            .sum();
        Ok(error_rate.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let columns = shared.resolve_columns();
        shared
            .fields
            .iter()
            .zip(&columns)
            .filter(|(field, _)| field.name.starts_with("departure"))
            .try_fold(1u64, |product, (field, column)| {
                let column = column.ok_or_else(|| {
                    no_solution(anyhow!("column of {:?} is ambiguous", field.name))
                })?;
                Ok(product * shared.mine[column])
            })
            .map(|product| product.to_string())
    }
}
