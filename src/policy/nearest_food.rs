use fxhash::FxHashSet;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::grid::Grid;
use crate::types::{GameView, Move, Point, FOOD, POWER, WALL};

use super::MovementPolicy;

/// Heads for the closest dot or power pellet.
///
/// Dangerous ghosts are treated as walls, the distance map from pacman picks
/// the target and the breadth first path to it gives the first step. Ties
/// go to the target found first scanning rows from the bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestFoodPolicy;

impl NearestFoodPolicy {
    fn nearest_target(board: &Grid, pacman: Point) -> Option<Point> {
        let distances = board.all_distances(pacman, WALL);
        (0..board.height())
            .cartesian_product(0..board.width())
            .map(|(y, x)| Point::new(x, y))
            .filter(|p| matches!(board.value_at(*p), Some(FOOD) | Some(POWER)))
            .filter_map(|p| {
                distances
                    .value_at(p)
                    .filter(|d| *d > 0)
                    .map(|d| (d, p))
            })
            .min_by_key(|(d, _)| *d)
            .map(|(_, p)| p)
    }

    fn first_open_move(board: &Grid, pacman: Point) -> Option<Move> {
        Move::all().into_iter().find(|mv| {
            board
                .step(pacman, *mv)
                .and_then(|p| board.value_at(p))
                .map_or(false, |v| v != WALL)
        })
    }
}

impl MovementPolicy for NearestFoodPolicy {
    fn info(&self) -> &str {
        "nearest food by breadth first search"
    }

    #[instrument(level = "trace", skip_all)]
    fn next_move(&mut self, game: &dyn GameView) -> Move {
        let pacman = game.pacman();
        let mut danger: FxHashSet<Point> = game
            .ghosts()
            .iter()
            .filter(|g| !g.is_edible())
            .map(|g| g.position)
            .collect();
        danger.remove(&pacman);

        let mut board = game.board().clone();
        for p in danger.iter() {
            // ghost positions come from the game so they are on the board
            let _ = board.set(p.x, p.y, WALL);
        }

        let first_hop = Self::nearest_target(&board, pacman)
            .and_then(|target| board.shortest_path(pacman, target, WALL))
            .and_then(|path| path.get(1).copied());
        if let Some(mv) = first_hop.and_then(|next| board.move_between(pacman, next)) {
            return mv;
        }

        debug!(%pacman, "no food in reach, taking any open move");
        Self::first_open_move(&board, pacman)
            .or_else(|| Self::first_open_move(game.board(), pacman))
            .unwrap_or(Move::Stay)
    }
}
