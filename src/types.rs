//! various types that are useful for working with the grid and the game
use crate::error::{GridError, Result};
use crate::game::{GameStatus, Ghost};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// cell value of an edible dot
pub const FOOD: i32 = 0;
/// cell value of an impassable wall
pub const WALL: i32 = 1;
/// cell value of an empty, already eaten, cell
pub const EMPTY: i32 = -1;
/// cell value of a power pellet
pub const POWER: i32 = 5;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// x offset
    pub x: i32,
    /// y offset
    pub y: i32,
}

/// Represents a move, up is towards larger y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[allow(missing_docs)]
    Stay,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Stay => write!(f, "stay"),
            Move::Left => write!(f, "left"),
            Move::Right => write!(f, "right"),
            Move::Up => write!(f, "up"),
            Move::Down => write!(f, "down"),
        }
    }
}

impl Move {
    /// convert this move to a vector
    pub fn to_vector(self) -> Vector {
        match self {
            Move::Stay => Vector { x: 0, y: 0 },
            Move::Left => Vector { x: -1, y: 0 },
            Move::Right => Vector { x: 1, y: 0 },
            Move::Up => Vector { x: 0, y: 1 },
            Move::Down => Vector { x: 0, y: -1 },
        }
    }

    /// create a Move from a unit vector, `None` for anything else
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { x: 0, y: 0 } => Some(Self::Stay),
            Vector { x: -1, y: 0 } => Some(Self::Left),
            Vector { x: 1, y: 0 } => Some(Self::Right),
            Vector { x: 0, y: 1 } => Some(Self::Up),
            Vector { x: 0, y: -1 } => Some(Self::Down),
            _ => None,
        }
    }

    /// returns a vec of the four moves that change position
    pub fn all() -> Vec<Move> {
        vec![Move::Up, Move::Down, Move::Left, Move::Right]
    }

    /// the integer code used by the game engine (STAY=0, UP=1, LEFT=2, DOWN=3, RIGHT=4)
    pub fn as_code(&self) -> i32 {
        match self {
            Move::Stay => 0,
            Move::Up => 1,
            Move::Left => 2,
            Move::Down => 3,
            Move::Right => 4,
        }
    }

    /// converts an engine code back to a move
    pub fn from_code(code: i32) -> Option<Move> {
        match code {
            0 => Some(Move::Stay),
            1 => Some(Move::Up),
            2 => Some(Move::Left),
            3 => Some(Move::Down),
            4 => Some(Move::Right),
            _ => None,
        }
    }

    /// the move pointing the other way, `Stay` is its own opposite
    pub fn opposite(&self) -> Move {
        match self {
            Move::Stay => Move::Stay,
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

/// An integer coordinate on the grid.
///
/// The textual form is `"x,y"`, which is what the game engine reads and
/// writes when exchanging positions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Point {
    /// build a point from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    #[allow(missing_docs)]
    pub fn add_vec(&self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    #[allow(missing_docs)]
    pub fn sub_vec(&self, v: Vector) -> Point {
        Point {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }

    #[allow(missing_docs)]
    pub fn to_vector(&self) -> Vector {
        Vector {
            x: self.x,
            y: self.y,
        }
    }

    /// euclidean distance between two points
    pub fn distance_2d(&self, other: &Point) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// euclidean distance to a point that may be missing, a missing
    /// counterpart is an `InvalidArgument`
    pub fn try_distance_2d(&self, other: Option<&Point>) -> Result<f64> {
        other
            .map(|p| self.distance_2d(p))
            .ok_or_else(|| GridError::InvalidArgument("got no point to measure against".into()))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GridError::InvalidArgument(format!("invalid position string: {:?}", s));

        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;

        Ok(Point { x, y })
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

/// A read only view of a running game.
///
/// This is everything a movement policy is allowed to look at, the game
/// itself can only be advanced by its owner.
pub trait GameView: Debug {
    /// the board, cell values are interpreted with [FOOD], [WALL], [EMPTY] and [POWER]
    fn board(&self) -> &Grid;

    /// current pacman position
    fn pacman(&self) -> Point;

    /// all ghosts currently on the board
    fn ghosts(&self) -> &[Ghost];

    /// where the game is in its lifecycle
    fn status(&self) -> GameStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_from_vector() {
        let start = Point::new(3, 4);
        for mv in Move::all() {
            let next = start.add_vec(mv.to_vector());
            let offset = next.sub_vec(start.to_vector()).to_vector();
            assert_eq!(Move::from_vector(offset), Some(mv));
        }
        assert_eq!(Move::from_vector(Vector { x: 2, y: 0 }), None);
    }

    #[test]
    fn test_move_codes_round_trip() {
        for mv in [Move::Stay, Move::Up, Move::Left, Move::Down, Move::Right] {
            assert_eq!(Move::from_code(mv.as_code()), Some(mv));
        }
        assert_eq!(Move::from_code(7), None);
        assert_eq!(Move::from_code(-1), None);
    }

    #[test]
    fn test_point_string_format() {
        assert_eq!(Point::new(0, 0).to_string(), "0,0");
        assert_eq!(Point::new(-5, -12).to_string(), "-5,-12");
        assert_eq!("12, 5".parse::<Point>().unwrap(), Point::new(12, 5));
        assert_eq!(" -3,7 ".parse::<Point>().unwrap(), Point::new(-3, 7));
    }

    #[test]
    fn test_point_parse_rejects_garbage() {
        for bad in ["", "12", "a,b", "1,2,3", ",4"] {
            assert!(matches!(
                bad.parse::<Point>(),
                Err(GridError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_point_equality_and_hash_key() {
        let mut set = fxhash::FxHashSet::default();
        set.insert(Point::new(3, 4));
        assert!(set.contains(&Point::from((3, 4))));
        assert_ne!(Point::new(3, 4), Point::new(4, 3));
    }

    #[test]
    fn test_distance_rejects_missing_point() {
        let p = Point::new(0, 0);
        assert_eq!(p.try_distance_2d(Some(&Point::new(3, 4))).unwrap(), 5.0);
        assert!(matches!(
            p.try_distance_2d(None),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_point_serde_uses_fields() {
        let json = serde_json::to_string(&Point::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Point::new(1, 2));
    }
}
