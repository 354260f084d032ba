#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Grid algorithms and a small game engine for a Pac-Man style board.
//!
//! The core is [grid::Grid], a dense integer raster with optional
//! wraparound, and its three breadth first searches: flood fill, shortest
//! path and the distance map from a single source. The [game] module builds
//! the classic 22x21 board on top of it and [policy] contains the movement
//! policies that drive pacman, the nearest food policy being the one that
//! ties the searches together.
//!
//! ```
//! use pacman_grid::{grid::Grid, types::Point};
//!
//! let mut grid = Grid::new(5, 5, 0).unwrap();
//! grid.set_wraparound(true);
//! let distances = grid.all_distances(Point::new(0, 0), 1);
//! assert_eq!(distances.get(4, 4).unwrap(), 2);
//! ```

use grid::Grid;

pub mod error;
pub mod game;
pub mod grid;
pub mod policy;
pub mod types;

/// Loads a grid fixture from a given string
pub fn grid_fixture(grid_fixture: &str) -> Grid {
    let g: Result<Grid, _> = serde_json::from_str(grid_fixture);
    g.expect("the json literal is valid")
}
