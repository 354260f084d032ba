//! The game engine: the standard board, pacman, the ghosts and scoring.
//!
//! A [GameState] is advanced one turn at a time with [GameState::step]. A
//! turn counts down the edible timers, moves pacman and eats whatever is on
//! the target cell, moves every ghost one random step, and finally resolves
//! collisions between pacman and the ghosts.
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{GridError, Result};
use crate::grid::Grid;
use crate::types::{GameView, Move, Point, EMPTY, FOOD, POWER, WALL};

mod config;

pub use config::{GameConfig, DEFAULT_LEVEL, MAX_GHOSTS, MAX_LEVEL};

#[allow(missing_docs)]
pub const BOARD_WIDTH: i32 = 22;
#[allow(missing_docs)]
pub const BOARD_HEIGHT: i32 = 21;
/// where pacman starts on the standard board
pub const PACMAN_START: Point = Point::new(11, 14);
/// eaten ghosts on the standard board go back here
pub const GHOST_HOME: Point = Point::new(10, 10);
/// spawn slots on the standard board, a config uses the first `ghost_count`
pub const GHOST_SPAWNS: [Point; MAX_GHOSTS] = [
    Point::new(10, 10),
    Point::new(10, 10),
    Point::new(11, 11),
    Point::new(11, 11),
    Point::new(12, 12),
    Point::new(12, 12),
];
const POWER_CELLS: [Point; 4] = [
    Point::new(2, 2),
    Point::new(2, 18),
    Point::new(19, 2),
    Point::new(19, 18),
];

/// points for a dot
pub const FOOD_SCORE: u32 = 10;
/// points for a power pellet
pub const POWER_SCORE: u32 = 100;
/// points for eating an edible ghost
pub const GHOST_SCORE: u32 = 200;
/// how many turns ghosts stay edible after a power pellet
pub const EDIBLE_TURNS: u32 = 10;

const GHOST_MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

/// lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// created, not started yet
    Init,
    /// accepting moves
    Play,
    /// temporarily not accepting moves
    Paused,
    /// over, see [Outcome]
    Done,
}

/// how a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// every dot was eaten
    Won,
    /// pacman ran into a dangerous ghost
    Lost,
    /// stopped before either happened
    Ended,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostStatus {
    Dangerous,
    Edible,
}

/// A ghost on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ghost {
    #[allow(missing_docs)]
    pub position: Point,
    #[allow(missing_docs)]
    pub status: GhostStatus,
    /// which ghost this is, purely cosmetic
    pub kind: u8,
    /// turns left before an edible ghost turns dangerous again
    pub edible_turns: u32,
    /// where the ghost goes back to once eaten
    pub home: Point,
}

impl Ghost {
    /// a dangerous ghost that returns to where it started when eaten
    pub fn new(position: Point, kind: u8) -> Self {
        Ghost {
            position,
            status: GhostStatus::Dangerous,
            kind,
            edible_turns: 0,
            home: position,
        }
    }

    #[allow(missing_docs)]
    pub fn is_edible(&self) -> bool {
        self.status == GhostStatus::Edible
    }

    fn frighten(&mut self) {
        self.status = GhostStatus::Edible;
        self.edible_turns = EDIBLE_TURNS;
    }

    fn tick(&mut self) {
        if self.is_edible() {
            self.edible_turns = self.edible_turns.saturating_sub(1);
            if self.edible_turns == 0 {
                self.status = GhostStatus::Dangerous;
            }
        }
    }

    fn send_home(&mut self) {
        self.position = self.home;
        self.status = GhostStatus::Dangerous;
        self.edible_turns = 0;
    }
}

/// Final tally of a game, handed back by [GameState::end].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    #[allow(missing_docs)]
    pub player_id: String,
    #[allow(missing_docs)]
    pub level: i32,
    #[allow(missing_docs)]
    pub score: u32,
    /// dots left on the board
    pub dots: usize,
    #[allow(missing_docs)]
    pub steps: u32,
    /// ghosts eaten
    pub kills: u32,
    #[allow(missing_docs)]
    pub outcome: Outcome,
}

/// A running game.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Grid,
    pacman: Point,
    ghosts: Vec<Ghost>,
    score: u32,
    dots: usize,
    steps: u32,
    kills: u32,
    status: GameStatus,
    outcome: Option<Outcome>,
    rng: SmallRng,
}

impl GameState {
    /// Builds the standard board: dots everywhere inside a wall border, a
    /// wall divider across the middle, a power pellet near each corner and
    /// the ghosts in the centre.
    pub fn new(config: GameConfig) -> Self {
        let config = config.normalized();
        let board = standard_board();
        let ghosts = GHOST_SPAWNS
            .iter()
            .take(config.ghost_count)
            .enumerate()
            .map(|(i, spawn)| Ghost {
                home: GHOST_HOME,
                ..Ghost::new(*spawn, i as u8 + 1)
            })
            .collect();

        Self::assemble(config, board, PACMAN_START, ghosts)
    }

    /// A game on a custom board. Pacman and every ghost must be on the grid.
    /// The grid's wraparound flag is replaced by the config's.
    pub fn with_board(
        config: GameConfig,
        board: Grid,
        pacman: Point,
        ghosts: Vec<Ghost>,
    ) -> Result<Self> {
        for p in std::iter::once(pacman).chain(ghosts.iter().map(|g| g.position)) {
            if !board.contains(p) {
                return Err(GridError::OutOfBounds { x: p.x, y: p.y });
            }
        }

        Ok(Self::assemble(config.normalized(), board, pacman, ghosts))
    }

    fn assemble(config: GameConfig, mut board: Grid, pacman: Point, ghosts: Vec<Ghost>) -> Self {
        board.set_wraparound(config.wraparound);
        let dots = board.count(FOOD);
        let rng = SmallRng::seed_from_u64(config.seed);

        GameState {
            config,
            board,
            pacman,
            ghosts,
            score: 0,
            dots,
            steps: 0,
            kills: 0,
            status: GameStatus::Init,
            outcome: None,
            rng,
        }
    }

    /// starts or resumes the game, a finished game stays finished
    pub fn play(&mut self) {
        if self.status != GameStatus::Done {
            self.status = GameStatus::Play;
        }
    }

    #[allow(missing_docs)]
    pub fn pause(&mut self) {
        if self.status == GameStatus::Play {
            self.status = GameStatus::Paused;
        }
    }

    /// Plays one turn with pacman taking `mv` and returns where pacman ends
    /// up. Does nothing unless the game is in [GameStatus::Play].
    #[instrument(level = "trace", skip_all, fields(mv = %mv))]
    pub fn step(&mut self, mv: Move) -> Point {
        if self.status != GameStatus::Play {
            return self.pacman;
        }

        for ghost in self.ghosts.iter_mut() {
            ghost.tick();
        }

        if let Some(next) = self.board.step(self.pacman, mv) {
            if self.board.value_at(next) != Some(WALL) {
                self.pacman = next;
                self.eat(next);
            }
        }
        self.steps += 1;

        if self.status == GameStatus::Done {
            return self.pacman;
        }

        self.move_ghosts();
        self.resolve_collisions();

        self.pacman
    }

    fn eat(&mut self, at: Point) {
        match self.board.value_at(at) {
            Some(FOOD) => {
                self.score += FOOD_SCORE;
                self.dots -= 1;
                self.clear(at);
                if self.dots == 0 {
                    self.finish(Outcome::Won);
                }
            }
            Some(POWER) => {
                self.score += POWER_SCORE;
                self.clear(at);
                debug!(%at, "power pellet eaten, ghosts are edible");
                for ghost in self.ghosts.iter_mut() {
                    ghost.frighten();
                }
            }
            _ => {}
        }
    }

    fn clear(&mut self, at: Point) {
        // at came from a successful step so it is on the board
        let _ = self.board.set(at.x, at.y, EMPTY);
    }

    fn move_ghosts(&mut self) {
        let board = &self.board;
        let rng = &mut self.rng;
        for ghost in self.ghosts.iter_mut() {
            let mv = GHOST_MOVES[rng.gen_range(0..GHOST_MOVES.len())];
            if let Some(next) = board.step(ghost.position, mv) {
                if board.value_at(next) != Some(WALL) {
                    ghost.position = next;
                }
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let mut caught = false;
        for ghost in self.ghosts.iter_mut() {
            if ghost.position != self.pacman {
                continue;
            }
            if ghost.is_edible() {
                self.score += GHOST_SCORE;
                self.kills += 1;
                debug!(kind = ghost.kind, at = %self.pacman, "ghost eaten");
                ghost.send_home();
            } else {
                caught = true;
            }
        }
        if caught {
            self.finish(Outcome::Lost);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
        self.status = GameStatus::Done;
        info!(
            outcome = ?self.outcome,
            score = self.score,
            steps = self.steps,
            "game over"
        );
    }

    /// Stops the game and reports the result. A game that was not already
    /// won or lost is recorded as [Outcome::Ended].
    pub fn end(&mut self) -> GameSummary {
        if self.status != GameStatus::Done {
            self.finish(Outcome::Ended);
        }

        GameSummary {
            player_id: self.config.player_id.clone(),
            level: self.config.level,
            score: self.score,
            dots: self.dots,
            steps: self.steps,
            kills: self.kills,
            outcome: self.outcome.unwrap_or(Outcome::Ended),
        }
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// dots still on the board
    pub fn dots(&self) -> usize {
        self.dots
    }

    #[allow(missing_docs)]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// ghosts eaten so far
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// `None` while the game is undecided
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

impl GameView for GameState {
    fn board(&self) -> &Grid {
        &self.board
    }

    fn pacman(&self) -> Point {
        self.pacman
    }

    fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    fn status(&self) -> GameStatus {
        self.status
    }
}

fn standard_board() -> Grid {
    let mut cells = vec![vec![FOOD; BOARD_HEIGHT as usize]; BOARD_WIDTH as usize];
    for (x, column) in cells.iter_mut().enumerate() {
        let x = x as i32;
        for (y, cell) in column.iter_mut().enumerate() {
            let y = y as i32;
            let border = x == 0 || y == 0 || x == BOARD_WIDTH - 1 || y == BOARD_HEIGHT - 1;
            let divider = y == 10 && (5..18).contains(&x);
            if border || divider {
                *cell = WALL;
            }
        }
    }
    for p in POWER_CELLS {
        cells[p.x as usize][p.y as usize] = POWER;
    }
    cells[PACMAN_START.x as usize][PACMAN_START.y as usize] = EMPTY;

    Grid::from_matrix(&cells).expect("the standard board is rectangular")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            player_id: "tester".to_string(),
            wraparound: false,
            ..GameConfig::default()
        }
    }

    /// a single open cell boxed in by walls, so nothing can move
    fn cell_in_a_box() -> Grid {
        let mut grid = Grid::new(3, 3, WALL).unwrap();
        grid.set(1, 1, EMPTY).unwrap();
        grid
    }

    /// row 1 reads EMPTY POWER FOOD WALL FOOD, everything else is wall
    fn power_corridor() -> Grid {
        let mut grid = Grid::new(5, 3, WALL).unwrap();
        for (x, v) in [EMPTY, POWER, FOOD, WALL, FOOD].into_iter().enumerate() {
            grid.set(x as i32, 1, v).unwrap();
        }
        grid
    }

    #[test]
    fn test_standard_board_layout() {
        let game = GameState::new(GameConfig::default());
        let board = game.board();
        assert_eq!(board.width(), 22);
        assert_eq!(board.height(), 21);
        assert!(board.is_wraparound());
        assert_eq!(board.count(WALL), 44 + 38 + 13);
        assert_eq!(board.count(POWER), 4);
        assert_eq!(board.get(11, 14).unwrap(), EMPTY);
        assert_eq!(board.get(4, 10).unwrap(), FOOD);
        assert_eq!(board.get(5, 10).unwrap(), WALL);
        assert_eq!(board.get(17, 10).unwrap(), WALL);
        assert_eq!(board.get(18, 10).unwrap(), FOOD);
        assert_eq!(game.dots(), 362);
        assert_eq!(game.ghosts().len(), 6);
        assert!(game.ghosts().iter().all(|g| g.home == GHOST_HOME));
        assert_eq!(game.pacman(), PACMAN_START);
        assert_eq!(game.status(), GameStatus::Init);
    }

    #[test]
    fn test_ghost_count_takes_first_slots() {
        let game = GameState::new(GameConfig {
            ghost_count: 3,
            ..GameConfig::default()
        });
        let spawns: Vec<_> = game.ghosts().iter().map(|g| g.position).collect();
        assert_eq!(spawns, GHOST_SPAWNS[..3].to_vec());
    }

    #[test]
    fn test_step_needs_play() {
        let mut game = GameState::new(config());
        assert_eq!(game.step(Move::Left), PACMAN_START);
        assert_eq!(game.steps(), 0);

        game.play();
        game.pause();
        assert_eq!(game.status(), GameStatus::Paused);
        assert_eq!(game.step(Move::Left), PACMAN_START);

        game.play();
        assert_eq!(game.step(Move::Left), Point::new(10, 14));
        assert_eq!(game.steps(), 1);
        assert_eq!(game.score(), FOOD_SCORE);
        assert_eq!(game.dots(), 361);
        assert_eq!(game.board().get(10, 14).unwrap(), EMPTY);
    }

    #[test]
    fn test_eating_every_dot_wins() {
        let board = Grid::from_matrix(&[[EMPTY], [FOOD], [FOOD]]).unwrap();
        let mut game = GameState::with_board(config(), board, Point::new(0, 0), vec![]).unwrap();
        game.play();
        assert_eq!(game.step(Move::Right), Point::new(1, 0));
        assert_eq!(game.status(), GameStatus::Play);
        assert_eq!(game.step(Move::Right), Point::new(2, 0));
        assert_eq!(game.status(), GameStatus::Done);
        assert_eq!(game.outcome(), Some(Outcome::Won));

        // finished games ignore further moves
        assert_eq!(game.step(Move::Left), Point::new(2, 0));
        game.play();
        assert_eq!(game.status(), GameStatus::Done);

        let summary = game.end();
        assert_eq!(summary.outcome, Outcome::Won);
        assert_eq!(summary.score, 2 * FOOD_SCORE);
        assert_eq!(summary.dots, 0);
        assert_eq!(summary.steps, 2);
    }

    #[test]
    fn test_walls_and_edges_block() {
        let mut game =
            GameState::with_board(config(), power_corridor(), Point::new(0, 1), vec![]).unwrap();
        game.play();
        assert_eq!(game.step(Move::Up), Point::new(0, 1));
        assert_eq!(game.step(Move::Left), Point::new(0, 1));
        assert_eq!(game.steps(), 2);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_wraparound_moves_across_the_edge() {
        let board = Grid::from_matrix(&[[EMPTY], [WALL], [FOOD], [FOOD]]).unwrap();
        let wrapping = GameConfig {
            wraparound: true,
            ..config()
        };
        let mut game =
            GameState::with_board(wrapping, board, Point::new(0, 0), vec![]).unwrap();
        game.play();
        assert_eq!(game.step(Move::Left), Point::new(3, 0));
        assert_eq!(game.score(), FOOD_SCORE);
        // a single row wraps onto itself
        assert_eq!(game.step(Move::Up), Point::new(3, 0));
        assert_eq!(game.step(Move::Right), Point::new(0, 0));
        assert_eq!(game.step(Move::Right), Point::new(0, 0));
    }

    #[test]
    fn test_power_pellet_makes_ghosts_edible_for_ten_turns() {
        let ghost = Ghost::new(Point::new(4, 1), 1);
        let mut game =
            GameState::with_board(config(), power_corridor(), Point::new(0, 1), vec![ghost])
                .unwrap();
        game.play();
        game.step(Move::Right);
        assert_eq!(game.score(), POWER_SCORE);
        assert_eq!(game.ghosts()[0].status, GhostStatus::Edible);
        assert_eq!(game.ghosts()[0].edible_turns, EDIBLE_TURNS);
        // the boxed in ghost never moves
        assert_eq!(game.ghosts()[0].position, Point::new(4, 1));

        for _ in 1..EDIBLE_TURNS {
            game.step(Move::Stay);
            assert!(game.ghosts()[0].is_edible());
        }
        game.step(Move::Stay);
        assert_eq!(game.ghosts()[0].status, GhostStatus::Dangerous);
        assert_eq!(game.ghosts()[0].edible_turns, 0);
    }

    #[test]
    fn test_eating_an_edible_ghost_sends_it_home() {
        let ghost = Ghost {
            status: GhostStatus::Edible,
            edible_turns: 5,
            ..Ghost::new(Point::new(1, 1), 3)
        };
        let mut game =
            GameState::with_board(config(), cell_in_a_box(), Point::new(1, 1), vec![ghost])
                .unwrap();
        game.play();
        game.step(Move::Stay);
        assert_eq!(game.score(), GHOST_SCORE);
        assert_eq!(game.kills(), 1);
        assert_eq!(game.ghosts()[0].status, GhostStatus::Dangerous);
        assert_eq!(game.status(), GameStatus::Play);

        // home is the same cell, and now the ghost bites
        game.step(Move::Stay);
        assert_eq!(game.outcome(), Some(Outcome::Lost));
        let summary = game.end();
        assert_eq!(summary.outcome, Outcome::Lost);
        assert_eq!(summary.kills, 1);
        assert_eq!(summary.player_id, "tester");
    }

    #[test]
    fn test_end_without_result_is_ended() {
        let mut game = GameState::new(config());
        game.play();
        game.step(Move::Stay);
        let summary = game.end();
        assert_eq!(game.status(), GameStatus::Done);
        assert_eq!(summary.outcome, Outcome::Ended);
        assert_eq!(summary.level, DEFAULT_LEVEL);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["outcome"], "Ended");
    }

    #[test]
    fn test_with_board_rejects_off_grid_pieces() {
        assert_eq!(
            GameState::with_board(config(), cell_in_a_box(), Point::new(3, 1), vec![]).err(),
            Some(GridError::OutOfBounds { x: 3, y: 1 })
        );
        let ghost = Ghost::new(Point::new(-1, 0), 1);
        assert!(
            GameState::with_board(config(), cell_in_a_box(), Point::new(1, 1), vec![ghost])
                .is_err()
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(GameConfig::default());
        let mut b = GameState::new(GameConfig::default());
        a.play();
        b.play();
        for _ in 0..25 {
            a.step(Move::Stay);
            b.step(Move::Stay);
        }
        assert_eq!(a.ghosts(), b.ghosts());
        assert_eq!(a.status(), b.status());
    }
}
