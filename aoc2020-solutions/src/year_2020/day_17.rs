//! Day 17: Conway Cubes

use crate::utils::parse::parse_lines;
use anyhow::bail;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

const CYCLES: usize = 6;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["simulation", "cellular-automaton"])]
pub struct Solver;

type Point<const N: usize> = [i32; N];

/// Every unit step in N dimensions except standing still
fn neighbour_offsets<const N: usize>() -> Vec<Point<N>> {
    (0..3usize.pow(N as u32))
        .map(|mut code| {
            let mut offset = [0; N];
            for axis in offset.iter_mut() {
                *axis = (code % 3) as i32 - 1;
                code /= 3;
            }
            offset
        })
        .filter(|offset| offset.iter().any(|&d| d != 0))
        .collect()
}

fn cycle<const N: usize>(active: &HashSet<Point<N>>, offsets: &[Point<N>]) -> HashSet<Point<N>> {
    let mut counts: HashMap<Point<N>, u8> = HashMap::new();
    for cube in active {
        for offset in offsets {
            let mut neighbour = *cube;
            for (axis, d) in neighbour.iter_mut().zip(offset) {
                *axis += d;
            }
            *counts.entry(neighbour).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(cube, count)| *count == 3 || (*count == 2 && active.contains(cube)))
        .map(|(cube, _)| cube)
        .collect()
}

/// Active cubes after six cycles, starting from a 2-D slice at the origin
fn simulate<const N: usize>(slice: &[(i32, i32)]) -> usize {
    let offsets = neighbour_offsets::<N>();
    let mut active: HashSet<Point<N>> = slice
        .iter()
        .map(|&(x, y)| {
            let mut point = [0; N];
            point[0] = x;
            point[1] = y;
            point
        })
        .collect();
    for _ in 0..CYCLES {
        active = cycle(&active, &offsets);
    }
    active.len()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(i32, i32)>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let rows = parse_lines(input, |line| {
            line.chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => bail!("unexpected {:?}", other),
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })?;
        Ok(rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, active)| **active)
                    .map(move |(x, _)| (x as i32, y as i32))
            })
            .collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate::<3>(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate::<4>(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;

    const EXAMPLE: &str = ".#.\n..#\n###\n";

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "112");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "848");
    }

    #[test]
    fn offsets_per_dimension() {
        assert_eq!(neighbour_offsets::<2>().len(), 8);
        assert_eq!(neighbour_offsets::<3>().len(), 26);
        assert_eq!(neighbour_offsets::<4>().len(), 80);
    }

    #[test]
    fn blinker_oscillates() {
        let offsets = neighbour_offsets::<2>();
        let vertical: HashSet<Point<2>> = [[0, -1], [0, 0], [0, 1]].into_iter().collect();
        let horizontal: HashSet<Point<2>> = [[-1, 0], [0, 0], [1, 0]].into_iter().collect();
        assert_eq!(cycle(&vertical, &offsets), horizontal);
        assert_eq!(cycle(&horizontal, &offsets), vertical);
    }

    #[test]
    fn empty_slice_stays_empty() {
        assert_eq!(simulate::<3>(&[]), 0);
    }
}
