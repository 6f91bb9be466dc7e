//! Day 20: Jurassic Jigsaw

use crate::utils::parse::{blocks, invalid, no_solution};
use anyhow::{Context, anyhow, bail};
use aoc2020_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc2020_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet, VecDeque};

const SEA_MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["grid", "search"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    fn step(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Self::North => (x, y - 1),
            Self::East => (x + 1, y),
            Self::South => (x, y + 1),
            Self::West => (x - 1, y),
        }
    }
}

/// Square grid of pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
struct Grid {
    size: usize,
    pixels: Vec<bool>,
}

impl Grid {
    fn get(&self, row: usize, col: usize) -> bool {
        self.pixels[row * self.size + col]
    }

    fn from_fn(size: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let pixels = (0..size * size).map(|i| f(i / size, i % size)).collect();
        Self { size, pixels }
    }

    fn rotated(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |r, c| self.get(n - 1 - c, r))
    }

    fn flipped(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |r, c| self.get(r, n - 1 - c))
    }

    /// The four rotations of the grid and of its mirror image
    fn orientations(&self) -> Vec<Grid> {
        let mut all = Vec::with_capacity(8);
        for start in [self.clone(), self.flipped()] {
            let mut grid = start;
            for _ in 0..4 {
                let next = grid.rotated();
                all.push(grid);
                grid = next;
            }
        }
        all
    }

    /// Edge pixels read left to right or top to bottom
    fn edge(&self, side: Direction) -> Vec<bool> {
        let last = self.size - 1;
        (0..self.size)
            .map(|i| match side {
                Direction::North => self.get(0, i),
                Direction::South => self.get(last, i),
                Direction::West => self.get(i, 0),
                Direction::East => self.get(i, last),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Tile {
    id: u64,
    grid: Grid,
}

/// Tiles placed on a grid of positions; x grows east, y grows south
struct Arrangement {
    placed: HashMap<(i32, i32), Tile>,
    min: (i32, i32),
    max: (i32, i32),
}

impl Arrangement {
    fn corner_product(&self) -> u64 {
        let (x0, y0) = self.min;
        let (x1, y1) = self.max;
        [(x0, y0), (x1, y0), (x0, y1), (x1, y1)]
            .iter()
            .filter_map(|pos| self.placed.get(pos))
            .map(|tile| tile.id)
            .product()
    }

    /// Every tile with its border removed, stitched into one grid
    fn image(&self) -> Result<Grid, SolveError> {
        let inner = self
            .placed
            .values()
            .next()
            .map_or(0, |tile| tile.grid.size - 2);
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for y in self.min.1..=self.max.1 {
            let band = rows.len();
            rows.resize(band + inner, Vec::new());
            for x in self.min.0..=self.max.0 {
                let tile = self
                    .placed
                    .get(&(x, y))
                    .ok_or_else(|| no_solution(anyhow!("no tile at ({}, {})", x, y)))?;
                for r in 0..inner {
                    rows[band + r].extend((0..inner).map(|c| tile.grid.get(r + 1, c + 1)));
                }
            }
        }
        if rows.iter().any(|row| row.len() != rows.len()) {
            return Err(no_solution(anyhow!("assembled image is not square")));
        }
        Ok(Grid {
            size: rows.len(),
            pixels: rows.concat(),
        })
    }
}

/// Grow the picture outward from the first tile, attaching any unplaced tile
/// whose edge lines up with a placed neighbour
fn assemble(tiles: &[Tile]) -> Result<Arrangement, SolveError> {
    let Some((first, rest)) = tiles.split_first() else {
        return Err(no_solution(anyhow!("no tiles")));
    };
    let mut unplaced: Vec<Tile> = rest.to_vec();
    let mut placed = HashMap::from([((0, 0), first.clone())]);
    let mut frontier = VecDeque::from([(0, 0)]);

    while let Some(pos) = frontier.pop_front() {
        for side in Direction::ALL {
            let target = side.step(pos);
            if placed.contains_key(&target) {
                continue;
            }
            let edge = placed[&pos].grid.edge(side);
            let found = unplaced.iter().enumerate().find_map(|(idx, tile)| {
                tile.grid
                    .orientations()
                    .into_iter()
                    .find(|grid| grid.edge(side.opposite()) == edge)
                    .map(|grid| (idx, grid))
            });
            if let Some((idx, grid)) = found {
                let tile = unplaced.swap_remove(idx);
                tracing::debug!(id = tile.id, x = target.0, y = target.1, "tile placed");
                placed.insert(target, Tile { id: tile.id, grid });
                frontier.push_back(target);
            }
        }
    }

    if !unplaced.is_empty() {
        return Err(no_solution(anyhow!(
            "{} tiles could not be attached",
            unplaced.len()
        )));
    }

    let xs = placed.keys().map(|&(x, _)| x);
    let ys = placed.keys().map(|&(_, y)| y);
    let min = (xs.clone().min().unwrap_or(0), ys.clone().min().unwrap_or(0));
    let max = (xs.max().unwrap_or(0), ys.max().unwrap_or(0));
    let area = ((max.0 - min.0 + 1) * (max.1 - min.1 + 1)) as usize;
    if area != placed.len() {
        return Err(no_solution(anyhow!("tiles do not form a rectangle")));
    }
    Ok(Arrangement { placed, min, max })
}

fn monster_offsets() -> Vec<(usize, usize)> {
    SEA_MONSTER
        .iter()
        .enumerate()
        .flat_map(|(r, line)| {
            line.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'#')
                .map(move |(c, _)| (r, c))
        })
        .collect()
}

/// Pixels covered by sea monsters in this orientation of the image
fn monster_pixels(image: &Grid, monster: &[(usize, usize)]) -> HashSet<(usize, usize)> {
    let height = monster.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
    let width = monster.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
    let mut covered = HashSet::new();
    for top in 0..=image.size.saturating_sub(height) {
        for left in 0..=image.size.saturating_sub(width) {
            if monster.iter().all(|&(r, c)| {
                top + r < image.size && left + c < image.size && image.get(top + r, left + c)
            }) {
                covered.extend(monster.iter().map(|&(r, c)| (top + r, left + c)));
            }
        }
    }
    covered
}

fn parse_tile(block: &str) -> anyhow::Result<Tile> {
    let mut lines = block.lines().map(str::trim);
    let header = lines.next().ok_or_else(|| anyhow!("empty tile"))?;
    let id = header
        .strip_prefix("Tile ")
        .and_then(|rest| rest.strip_suffix(':'))
        .ok_or_else(|| anyhow!("expected `Tile N:`, got {:?}", header))?
        .parse::<u64>()
        .context("tile id")?;

    let rows = lines
        .map(|line| {
            line.chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => bail!("unexpected {:?} in tile {}", other, id),
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let size = rows.len();
    if size < 3 || rows.iter().any(|row| row.len() != size) {
        bail!("tile {} must be square and at least 3 wide", id);
    }
    Ok(Tile {
        id,
        grid: Grid {
            size,
            pixels: rows.concat(),
        },
    })
}

pub struct Jigsaw {
    tiles: Vec<Tile>,
    arrangement: Option<Arrangement>,
}

impl Jigsaw {
    fn arrangement(&mut self) -> Result<&Arrangement, SolveError> {
        let arrangement = match self.arrangement.take() {
            Some(arrangement) => arrangement,
            None => assemble(&self.tiles)?,
        };
        Ok(self.arrangement.insert(arrangement))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Jigsaw;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let tiles = blocks(input)
            .map(parse_tile)
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(invalid)?;
        if let Some(tile) = tiles.iter().find(|t| t.grid.size != tiles[0].grid.size) {
            return Err(invalid(anyhow!("tile {} differs in size", tile.id)));
        }
        Ok(Jigsaw {
            tiles,
            arrangement: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.arrangement()?.corner_product().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let image = shared.arrangement()?.image()?;
        let monster = monster_offsets();
        let covered = image
            .orientations()
            .iter()
            .map(|oriented| monster_pixels(oriented, &monster))
            .find(|covered| !covered.is_empty())
            .ok_or_else(|| no_solution(anyhow!("no sea monsters in any orientation")))?;
        let rough = image.pixels.iter().filter(|&&p| p).count() - covered.len();
        Ok(rough.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse::solve;
    use indoc::indoc;

    const EXAMPLE: &str = include_str!("../../tests/fixtures/day_20_example.txt");

    #[test]
    fn example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "20899048083289");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "273");
    }

    #[test]
    fn assembly_is_reused() {
        let mut jigsaw = Solver::parse(EXAMPLE).unwrap();
        <Solver as PartSolver<1>>::solve(&mut jigsaw).unwrap();
        assert!(jigsaw.arrangement.is_some());
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut jigsaw).unwrap(), "273");
    }

    #[test]
    fn eight_distinct_orientations() {
        let grid = Grid {
            size: 3,
            pixels: vec![true, true, false, false, false, false, true, false, false],
        };
        let all = grid.orientations();
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn rotation_moves_edges_clockwise() {
        let grid = Grid {
            size: 3,
            pixels: vec![true, true, true, false, false, false, false, false, false],
        };
        assert_eq!(grid.rotated().edge(Direction::East), vec![true, true, true]);
    }

    #[test]
    fn unmatched_tiles_fail() {
        let input = indoc! {"
            Tile 1:
            ###
            ###
            ###

            Tile 2:
            ...
            ...
            ...
        "};
        let mut jigsaw = Solver::parse(input).unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut jigsaw),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn malformed_tiles() {
        assert!(Solver::parse("Tile x:\n###\n###\n###").is_err());
        assert!(Solver::parse("Tile 1:\n###\n##\n###").is_err());
        assert!(Solver::parse("Tile 1:\n###\n###\n###\n\nTile 2:\n####\n####\n####\n####").is_err());
    }
}
