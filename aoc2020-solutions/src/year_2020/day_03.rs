//! Day 3: Toboggan Trajectory

use crate::utils::parse::parse_lines;
use anyhow::bail;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["grid"])]
pub struct Solver;

/// Tree map; each row repeats to the right forever
pub struct Forest {
    rows: Vec<Vec<bool>>,
    width: usize,
}

impl Forest {
    fn trees_hit(&self, right: usize, down: usize) -> usize {
        self.rows
            .iter()
            .step_by(down)
            .enumerate()
            .skip(1)
            .filter(|(step, row)| row[(step * right) % self.width])
            .count()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Forest;

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

        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(ParseError::MissingData("empty map".into()));
        }
        if rows.iter().any(|row| row.len() != width) {
            return Err(ParseError::InvalidFormat("rows differ in width".into()));
        }
        Ok(Forest { rows, width })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.trees_hit(3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: usize = SLOPES
            .iter()
            .map(|&(right, down)| {
                let trees = shared.trees_hit(right, down);
                tracing::debug!(right, down, trees, "slope");
                trees
            })
            .product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ..##.......
        #...#...#..
        .#....#..#.
        ..#.#...#.#
        .#...##..#.
        ..#.##.....
        .#.#.#....#
        .#........#
        #.##...#...
        #...##....#
        .#..#...#.#
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "7");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "336");
    }

    #[test]
    fn per_slope_counts() {
        let forest = Solver::parse(EXAMPLE).unwrap();
        let counts: Vec<_> = SLOPES.iter().map(|&(r, d)| forest.trees_hit(r, d)).collect();
        assert_eq!(counts, vec![2, 7, 3, 4, 2]);
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(Solver::parse("..#\n.#").is_err());
    }
}
