//! breadth first traversals over the grid: flood fill, shortest path and
//! the distance map from a single source
use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::types::Point;

use super::Grid;

/// marks a cell that the distance map never reached
pub const UNREACHED: i32 = -1;

impl Grid {
    /// Flood fills the 4-connected region of `start` with `new_value`.
    ///
    /// The region is every cell reachable from `start` through cells holding
    /// the value `start` had when the call began. Returns how many cells were
    /// changed, which is `0` when `start` is off the grid or already holds
    /// `new_value`.
    #[instrument(level = "trace", skip_all)]
    pub fn fill(&mut self, start: Point, new_value: i32) -> usize {
        let old_value = match self.value_at(start) {
            Some(v) if v != new_value => v,
            _ => return 0,
        };

        let mut queue = VecDeque::new();
        let start_idx = self.flat_index(start.x, start.y);
        self.cells[start_idx] = new_value;
        queue.push_back(start);
        let mut count = 1;

        while let Some(current) = queue.pop_front() {
            for next in self.neighbor_slots(current).into_iter().flatten() {
                let idx = self.flat_index(next.x, next.y);
                // mark on enqueue, so no cell is queued twice
                if self.cells[idx] == old_value {
                    self.cells[idx] = new_value;
                    count += 1;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    /// A shortest 4-connected path from `start` to `goal` that never enters
    /// a cell holding `obstacle`.
    ///
    /// The path includes both ends, so its length in moves is `len() - 1`.
    /// `None` when either end is off the grid or on an obstacle, or when the
    /// goal cannot be reached. When several shortest paths exist any one of
    /// them may be returned.
    ///
    /// ```
    /// # use pacman_grid::{grid::Grid, types::Point};
    /// let grid = Grid::from_matrix(&[[0, 0, 0], [1, 1, 0], [0, 0, 0]]).unwrap();
    /// let path = grid.shortest_path(Point::new(0, 0), Point::new(2, 0), 1).unwrap();
    /// assert_eq!(path.len() - 1, 6);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn shortest_path(&self, start: Point, goal: Point, obstacle: i32) -> Option<Vec<Point>> {
        let start_value = self.value_at(start)?;
        let goal_value = self.value_at(goal)?;
        if start_value == obstacle || goal_value == obstacle {
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }

        let start_idx = self.flat_index(start.x, start.y);
        let goal_idx = self.flat_index(goal.x, goal.y);

        // discovered_by[i] is the cell that first reached i
        let mut discovered_by: Vec<Option<usize>> = vec![None; self.cells.len()];
        discovered_by[start_idx] = Some(start_idx);

        let mut queue = VecDeque::new();
        queue.push_back(start);

        'search: while let Some(current) = queue.pop_front() {
            let current_idx = self.flat_index(current.x, current.y);
            for next in self.neighbor_slots(current).into_iter().flatten() {
                let idx = self.flat_index(next.x, next.y);
                if discovered_by[idx].is_some() || self.cells[idx] == obstacle {
                    continue;
                }
                discovered_by[idx] = Some(current_idx);
                if idx == goal_idx {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        if discovered_by[goal_idx].is_none() {
            debug!(%start, %goal, obstacle, "goal is unreachable");
            return None;
        }

        let mut path = vec![goal];
        let mut idx = goal_idx;
        while idx != start_idx {
            idx = discovered_by[idx]?;
            path.push(self.point_of(idx));
        }
        path.reverse();

        Some(path)
    }

    /// Breadth first distances from `start` to every cell.
    ///
    /// The result is a new grid of the same size and wraparound setting.
    /// `start` holds `0`, every reachable cell holds its move count, and
    /// cells that are obstacles or cannot be reached hold [UNREACHED]. When
    /// `start` is off the grid every cell is [UNREACHED].
    #[instrument(level = "trace", skip_all)]
    pub fn all_distances(&self, start: Point, obstacle: i32) -> Grid {
        let mut distances = Grid {
            width: self.width,
            height: self.height,
            cells: vec![UNREACHED; self.cells.len()],
            wraparound: self.wraparound,
        };

        if !self.contains(start) {
            return distances;
        }

        let start_idx = self.flat_index(start.x, start.y);
        distances.cells[start_idx] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let current_distance = distances.cells[self.flat_index(current.x, current.y)];
            for next in self.neighbor_slots(current).into_iter().flatten() {
                let idx = self.flat_index(next.x, next.y);
                if self.cells[idx] == obstacle || distances.cells[idx] != UNREACHED {
                    continue;
                }
                distances.cells[idx] = current_distance + 1;
                queue.push_back(next);
            }
        }

        distances
    }
}
