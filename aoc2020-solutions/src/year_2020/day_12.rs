//! Day 12: Rain Risk

use crate::utils::parse::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["navigation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Translate by (east, north)
    Move(i64, i64),
    /// Counter-clockwise quarter turns, 0..4
    Turn(u8),
    Forward(i64),
}

/// East/north vector
type Vector = (i64, i64);

fn rotate((east, north): Vector, quarter_turns: u8) -> Vector {
    match quarter_turns % 4 {
        0 => (east, north),
        1 => (-north, east),
        2 => (-east, -north),
        _ => (north, -east),
    }
}

fn parse_action(line: &str) -> anyhow::Result<Action> {
    let mut chars = line.chars();
    let action = chars.next().ok_or_else(|| anyhow!("empty action"))?;
    let value: i64 = chars
        .as_str()
        .parse()
        .with_context(|| format!("value of {:?}", line))?;

    let quarter_turns = |degrees: i64| -> anyhow::Result<u8> {
        if degrees % 90 != 0 {
            bail!("turn of {} degrees is not a multiple of 90", degrees);
        }
        Ok((degrees / 90).rem_euclid(4) as u8)
    };

    Ok(match action {
        'N' => Action::Move(0, value),
        'S' => Action::Move(0, -value),
        'E' => Action::Move(value, 0),
        'W' => Action::Move(-value, 0),
        'L' => Action::Turn(quarter_turns(value)?),
        'R' => Action::Turn(quarter_turns(-value)?),
        'F' => Action::Forward(value),
        other => bail!("unknown action {:?}", other),
    })
}

fn manhattan((east, north): Vector) -> i64 {
    east.abs() + north.abs()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_action)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut ship: Vector = (0, 0);
        let mut heading: Vector = (1, 0);
        for action in shared.iter() {
            match *action {
                Action::Move(de, dn) => ship = (ship.0 + de, ship.1 + dn),
                Action::Turn(q) => heading = rotate(heading, q),
                Action::Forward(n) => ship = (ship.0 + heading.0 * n, ship.1 + heading.1 * n),
            }
        }
        Ok(manhattan(ship).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut ship: Vector = (0, 0);
        let mut waypoint: Vector = (10, 1);
        for action in shared.iter() {
            match *action {
                Action::Move(de, dn) => waypoint = (waypoint.0 + de, waypoint.1 + dn),
                Action::Turn(q) => waypoint = rotate(waypoint, q),
                Action::Forward(n) => {
                    ship = (ship.0 + waypoint.0 * n, ship.1 + waypoint.1 * n)
                }
            }
        }
        Ok(manhattan(ship).to_string())
    }
}
