//! the one neighbour rule every search shares
use crate::types::{Move, Point, Vector};

use super::Grid;

const OFFSETS: [Vector; 4] = [
    Vector { x: 1, y: 0 },
    Vector { x: -1, y: 0 },
    Vector { x: 0, y: 1 },
    Vector { x: 0, y: -1 },
];

impl Grid {
    /// The 4-connected neighbours of `point`.
    ///
    /// With wraparound each coordinate is taken modulo its dimension, so the
    /// left neighbour of `(0, y)` is `(width - 1, y)`. Without it, steps that
    /// leave the grid are dropped. A point off the grid has no neighbours.
    pub fn neighbors(&self, point: Point) -> Vec<Point> {
        if !self.contains(point) {
            return vec![];
        }
        self.neighbor_slots(point).into_iter().flatten().collect()
    }

    /// Where a single move from `point` lands under this grid's topology,
    /// `None` if `point` is off the grid or the move would leave it.
    pub fn step(&self, point: Point, mv: Move) -> Option<Point> {
        if !self.contains(point) {
            return None;
        }
        self.offset(point, mv.to_vector())
    }

    /// The move that takes `from` to the adjacent `to`, honouring wraparound.
    /// `Stay` when they are equal, `None` when they are not neighbours.
    pub fn move_between(&self, from: Point, to: Point) -> Option<Move> {
        if from == to {
            return self.contains(from).then_some(Move::Stay);
        }
        Move::all()
            .into_iter()
            .find(|mv| self.step(from, *mv) == Some(to))
    }

    /// fixed size neighbour list, `None` where a step leaves a bounded grid
    pub(super) fn neighbor_slots(&self, point: Point) -> [Option<Point>; 4] {
        OFFSETS.map(|v| self.offset(point, v))
    }

    fn offset(&self, point: Point, v: Vector) -> Option<Point> {
        let raw = point.add_vec(v);
        if self.wraparound {
            Some(Point::new(
                raw.x.rem_euclid(self.width),
                raw.y.rem_euclid(self.height),
            ))
        } else if self.contains(raw) {
            Some(raw)
        } else {
            None
        }
    }
}
