use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "X",
                Cell::Open => " ",
            }
        )
    }
}

/// A pixel coordinate, `x` counting columns from the left and `y` counting rows from the top
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Sum of the absolute coordinate differences
    pub fn manhattan(&self, other: Point) -> f64 {
        (self.x.abs_diff(other.x) + self.y.abs_diff(other.y)) as f64
    }

    /// Straight-line distance
    pub fn euclidean(&self, other: Point) -> f64 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        dx.hypot(dy)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({};{})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction one has to move in to get from `from` to `to`.
    /// Returns `None` when the two points are equal or diagonal to each other.
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        match (from.x.cmp(&to.x), from.y.cmp(&to.y)) {
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Greater) => Some(Direction::Up),
            (std::cmp::Ordering::Equal, std::cmp::Ordering::Less) => Some(Direction::Down),
            (std::cmp::Ordering::Greater, std::cmp::Ordering::Equal) => Some(Direction::Left),
            (std::cmp::Ordering::Less, std::cmp::Ordering::Equal) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

/// A rectangular grid of wall / open cells, indexed as `cells[row][col]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelGrid {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl PixelGrid {
    pub fn new(rows: usize, columns: usize, fill: Cell) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![fill; columns]; rows],
        }
    }

    pub fn get(&self, point: Point) -> Cell {
        self.cells[point.y][point.x]
    }

    pub fn set(&mut self, point: Point, cell: Cell) {
        self.cells[point.y][point.x] = cell;
    }

    pub fn is_open(&self, point: Point) -> bool {
        self.get(point) == Cell::Open
    }

    /// True for cells on the outermost rows and columns
    pub fn is_boundary(&self, point: Point) -> bool {
        point.y == 0 || point.x == 0 || point.y + 1 == self.rows || point.x + 1 == self.columns
    }

    /// Whether the cell directly below `point` exists and is open
    pub fn is_open_below(&self, point: Point) -> bool {
        point.y + 1 < self.rows && self.is_open(Point::new(point.x, point.y + 1))
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }
}

impl Display for PixelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses one row per line, `#` or `X` for walls and `.` or a space for open cells.
impl FromStr for PixelGrid {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();

        for (y, line) in s.lines().filter(|l| !l.is_empty()).enumerate() {
            let row = line
                .chars()
                .enumerate()
                .map(|(x, c)| match c {
                    '#' | 'X' => Ok(Cell::Wall),
                    '.' | ' ' => Ok(Cell::Open),
                    other => Err(SolveError::InvalidGrid {
                        reason: format!("unexpected character {:?} at {}", other, Point::new(x, y)),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = cells.first() {
                if first.len() != row.len() {
                    return Err(SolveError::InvalidGrid {
                        reason: format!(
                            "row {} has {} cells, expected {}",
                            y,
                            row.len(),
                            first.len()
                        ),
                    });
                }
            }
            cells.push(row);
        }

        Ok(PixelGrid {
            rows: cells.len(),
            columns: cells.first().map_or(0, Vec::len),
            cells,
        })
    }
}
