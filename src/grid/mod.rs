//! A dense, rectangular raster of integers with optional wraparound.
//!
//! The grid has no notion of walls or food, every query that needs to know
//! what is impassable takes an `obstacle` value from the caller. The same
//! board can therefore be searched around walls by the movement policy and
//! scanned for food distances by the game without any conversion.
//!
//! Coordinates follow the game engine: `x` indexes columns in `[0, width)`,
//! `y` indexes rows in `[0, height)`, and matrices handed in or out are
//! column major (`matrix[x][y]`).
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::types::Point;

mod neighbors;
mod search;

pub use search::UNREACHED;

/// dense integer matrix with positional addressing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<i32>,
    wraparound: bool,
}

impl Grid {
    /// Builds a `width` x `height` grid with every cell set to `fill`.
    /// Wraparound starts disabled.
    pub fn new(width: i32, height: i32, fill: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        Ok(Grid {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
            wraparound: false,
        })
    }

    /// Deep copies a column major matrix, `matrix[x]` is one column of
    /// `height` cells. Empty or ragged input is an `InvalidShape`.
    pub fn from_matrix<R: AsRef<[i32]>>(matrix: &[R]) -> Result<Self> {
        let height = match matrix.first() {
            Some(column) if !column.as_ref().is_empty() => column.as_ref().len(),
            _ => return Err(GridError::InvalidShape),
        };
        if matrix.iter().any(|column| column.as_ref().len() != height) {
            return Err(GridError::InvalidShape);
        }

        let width = matrix.len();
        let mut cells = vec![0; width * height];
        for (x, column) in matrix.iter().enumerate() {
            for (y, value) in column.as_ref().iter().enumerate() {
                cells[y * width + x] = *value;
            }
        }

        Ok(Grid {
            width: width as i32,
            height: height as i32,
            cells,
            wraparound: false,
        })
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// value at (x, y), addressing outside the grid is an error
    pub fn get(&self, x: i32, y: i32) -> Result<i32> {
        self.cell_index(x, y)
            .map(|idx| self.cells[idx])
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// overwrite the value at (x, y), the grid is untouched on error
    pub fn set(&mut self, x: i32, y: i32, value: i32) -> Result<()> {
        let idx = self.cell_index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        self.cells[idx] = value;
        Ok(())
    }

    /// value at `point`, `None` when it is off the grid
    pub fn value_at(&self, point: Point) -> Option<i32> {
        self.cell_index(point.x, point.y).map(|idx| self.cells[idx])
    }

    /// Is the point on the grid? Never fails, a missing point is simply not contained.
    ///
    /// ```
    /// # use pacman_grid::{grid::Grid, types::Point};
    /// let grid = Grid::new(3, 2, 0).unwrap();
    /// assert!(grid.contains(Point::new(2, 1)));
    /// assert!(!grid.contains(Point::new(3, 1)));
    /// assert!(!grid.contains(None));
    /// ```
    pub fn contains(&self, point: impl Into<Option<Point>>) -> bool {
        point
            .into()
            .map_or(false, |p| self.cell_index(p.x, p.y).is_some())
    }

    /// whether neighbour computation wraps at the edges
    pub fn is_wraparound(&self) -> bool {
        self.wraparound
    }

    /// toggles the topology used by every later search
    pub fn set_wraparound(&mut self, wraparound: bool) {
        self.wraparound = wraparound;
    }

    /// An independent, column major copy of every cell.
    pub fn to_matrix(&self) -> Vec<Vec<i32>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.cells[self.flat_index(x, y)])
                    .collect()
            })
            .collect()
    }

    /// number of cells holding exactly `value`
    pub fn count(&self, value: i32) -> usize {
        self.cells.iter().filter(|v| **v == value).count()
    }

    /// every point holding `value`, in row major order starting at (0, 0)
    pub fn positions_of(&self, value: i32) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, v)| **v == value)
            .map(move |(idx, _)| self.point_of(idx))
    }

    fn cell_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some(self.flat_index(x, y))
        }
    }

    fn flat_index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn point_of(&self, idx: usize) -> Point {
        let width = self.width as usize;
        Point::new((idx % width) as i32, (idx / width) as i32)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{:>3} ", self.cells[self.flat_index(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// wire form of a grid, the cells are the column major matrix
#[derive(Serialize, Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    #[serde(default)]
    wraparound: bool,
    cells: Vec<Vec<i32>>,
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        GridRepr {
            width: grid.width,
            height: grid.height,
            wraparound: grid.wraparound,
            cells: grid.to_matrix(),
        }
    }
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let mut grid = Grid::from_matrix(&repr.cells)?;
        if grid.width != repr.width || grid.height != repr.height {
            return Err(GridError::InvalidShape);
        }
        grid.wraparound = repr.wraparound;
        Ok(grid)
    }
}
