//! Movement policies decide pacman's next move from a read only view of the
//! game. [run_game] drives a whole game with one of them.
use std::fmt::Debug;

use tracing::{info, instrument};

use crate::game::{GameState, GameStatus, GameSummary};
use crate::types::{GameView, Move};

mod nearest_food;
mod random_walk;

pub use nearest_food::NearestFoodPolicy;
pub use random_walk::RandomWalkPolicy;

/// Something that can steer pacman.
pub trait MovementPolicy: Debug {
    /// short human readable description
    fn info(&self) -> &str;

    /// the move pacman should make this turn
    fn next_move(&mut self, game: &dyn GameView) -> Move;
}

/// Plays `state` to completion with `policy`, stopping early after
/// `max_steps` turns, and returns the summary from [GameState::end].
#[instrument(level = "debug", skip_all, fields(policy = policy.info()))]
pub fn run_game(
    state: &mut GameState,
    policy: &mut dyn MovementPolicy,
    max_steps: u32,
) -> GameSummary {
    state.play();
    while state.status() == GameStatus::Play && state.steps() < max_steps {
        let mv = policy.next_move(&*state);
        state.step(mv);
    }

    let summary = state.end();
    info!(
        score = summary.score,
        steps = summary.steps,
        outcome = ?summary.outcome,
        "finished game"
    );
    summary
}
