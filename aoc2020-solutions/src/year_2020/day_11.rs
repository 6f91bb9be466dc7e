//! Day 11: Seating System

use crate::utils::parse::parse_lines;
use anyhow::bail;
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["grid", "simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Floor,
    Empty,
    Occupied,
}

pub struct Layout {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Layout {
    fn step(&self, row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(dr).filter(|&r| r < self.rows)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < self.cols)?;
        Some((row, col))
    }

    /// For every cell, the seats it watches: the adjacent ones, or with
    /// `line_of_sight` the first seat in each direction
    fn neighbours(&self, line_of_sight: bool) -> Vec<Vec<usize>> {
        (0..self.cells.len())
            .map(|index| {
                if self.cells[index] == Cell::Floor {
                    return Vec::new();
                }
                let (row, col) = (index / self.cols, index % self.cols);
                DIRECTIONS
                    .iter()
                    .filter_map(|&dir| {
                        let mut pos = self.step(row, col, dir)?;
                        while line_of_sight && self.cells[pos.0 * self.cols + pos.1] == Cell::Floor {
                            pos = self.step(pos.0, pos.1, dir)?;
                        }
                        let seat = pos.0 * self.cols + pos.1;
                        (self.cells[seat] != Cell::Floor).then_some(seat)
                    })
                    .collect()
            })
            .collect()
    }

    /// Occupied seats once the layout stops changing
    fn settle(&self, line_of_sight: bool, tolerance: usize) -> usize {
        let neighbours = self.neighbours(line_of_sight);
        let mut cells = self.cells.clone();

        loop {
            let next: Vec<Cell> = cells
                .iter()
                .zip(&neighbours)
                .map(|(&cell, seen)| {
                    let occupied = seen.iter().filter(|&&n| cells[n] == Cell::Occupied).count();
                    match cell {
                        Cell::Empty if occupied == 0 => Cell::Occupied,
                        Cell::Occupied if occupied >= tolerance => Cell::Empty,
                        other => other,
                    }
                })
                .collect();
            if next == cells {
                break;
            }
            cells = next;
        }

        cells.iter().filter(|&&c| c == Cell::Occupied).count()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Layout;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let grid = parse_lines(input, |line| {
            line.chars()
                .map(|c| match c {
                    '.' => Ok(Cell::Floor),
                    'L' => Ok(Cell::Empty),
                    '#' => Ok(Cell::Occupied),
                    other => bail!("unexpected {:?}", other),
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })?;

        let cols = grid.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(ParseError::MissingData("empty layout".into()));
        }
        if grid.iter().any(|row| row.len() != cols) {
            return Err(ParseError::InvalidFormat("rows differ in width".into()));
        }
        Ok(Layout {
            rows: grid.len(),
            cols,
            cells: grid.into_iter().flatten().collect(),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.settle(false, 4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.settle(true, 5).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        L.LL.LL.LL
        LLLLLLL.LL
        L.L.L..L..
        LLLL.LL.LL
        L.LL.LL.LL
        L.LLLLL.LL
        ..L.L.....
        LLLLLLLLLL
        L.LLLLLL.L
        L.LLLLL.LL
    "};

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "37");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "26");
    }

    #[test]
    fn line_of_sight_skips_floor() {
        let layout = Solver::parse(indoc! {"
            .............
            .L.L.#.#.#.#.
            .............
        "})
        .unwrap();
        let neighbours = layout.neighbours(true);
        // the leftmost seat sees only the seat two cells to its right
        assert_eq!(neighbours[13 + 1], vec![13 + 3]);
        assert!(layout.neighbours(false)[13 + 1].is_empty());
    }
}
