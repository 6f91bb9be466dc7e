//! Day 13: Shuttle Search

use crate::utils::parse::{invalid, no_solution};
use anyhow::{Context, anyhow};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["math"])]
pub struct Solver;

pub struct Schedule {
    earliest: u64,
    /// (offset in the list, bus id)
    buses: Vec<(u64, u64)>,
}

fn parse_schedule(input: &str) -> anyhow::Result<Schedule> {
    let mut lines = input.trim().lines();
    let earliest = lines
        .next()
        .ok_or_else(|| anyhow!("missing timestamp line"))?
        .trim()
        .parse()
        .context("timestamp")?;
    let buses = lines
        .next()
        .ok_or_else(|| anyhow!("missing bus line"))?
        .trim()
        .split(',')
        .enumerate()
        .filter(|&(_, id)| id != "x")
        .map(|(offset, id)| {
            let id: u64 = id.parse().with_context(|| format!("bus id {:?}", id))?;
            if id == 0 {
                anyhow::bail!("bus id must be positive");
            }
            Ok((offset as u64, id))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if buses.is_empty() {
        anyhow::bail!("no buses in service");
    }
    Ok(Schedule { earliest, buses })
}

/// Earliest positive t with (t + offset) divisible by every bus id
///
/// Buses are fixed one at a time; once a bus lines up the step grows by its
/// id, so later steps keep every earlier bus aligned.
fn earliest_alignment(buses: &[(u64, u64)]) -> Option<u64> {
    let mut time = 0u64;
    let mut step = 1u64;
    for &(offset, id) in buses {
        let mut tries = 0;
        while time == 0 || (time + offset) % id != 0 {
            time = time.checked_add(step)?;
            tries += 1;
            if tries > id {
                return None;
            }
        }
        tracing::debug!(id, offset, time, "bus aligned");
        step = step.checked_mul(id)?;
    }
    Some(time)
}

impl AocParser for Solver {
    type SharedData<'a> = Schedule;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_schedule(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let earliest = shared.earliest;
        let (id, wait) = shared
            .buses
            .iter()
            .map(|&(_, id)| (id, (id - earliest % id) % id))
            .min_by_key(|&(_, wait)| wait)
            .ok_or_else(|| no_solution(anyhow!("no buses")))?;
        Ok((id * wait).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        earliest_alignment(&shared.buses)
            .map(|t| t.to_string())
            .ok_or_else(|| no_solution(anyhow!("bus ids admit no common timestamp")))
    }
}
