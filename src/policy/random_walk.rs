use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::types::{GameView, Move};

use super::MovementPolicy;

/// picks one of the four moves uniformly at random, walls or not
#[derive(Debug, Clone)]
pub struct RandomWalkPolicy {
    rng: SmallRng,
}

impl RandomWalkPolicy {
    #[allow(missing_docs)]
    pub fn new(seed: u64) -> Self {
        RandomWalkPolicy {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MovementPolicy for RandomWalkPolicy {
    fn info(&self) -> &str {
        "random walk"
    }

    fn next_move(&mut self, _game: &dyn GameView) -> Move {
        let moves = Move::all();
        moves[self.rng.gen_range(0..moves.len())]
    }
}
