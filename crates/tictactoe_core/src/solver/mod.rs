//! Computer opponent.
//!
//! [`best_move`] picks a square for the side to move. The side to move is
//! also the maximizing side of the search, so the solver can play either
//! symbol.
//!
//! | Difficulty | Policy |
//! |------------|--------|
//! | Easy | uniformly random legal move |
//! | Medium | alpha-beta limited to [`SearchConfig::medium_depth`] plies |
//! | Hard | full-depth alpha-beta |

mod difficulty;
mod minimax;

pub use difficulty::Difficulty;
pub use minimax::{Analysis, FULL_DEPTH, analyze};

use crate::rules::legal_moves;
use crate::{Board, Player, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default search horizon for [`Difficulty::Medium`].
pub const DEFAULT_MEDIUM_DEPTH: u8 = 2;

/// Tunables for the search-based difficulties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched on medium. Two plies see immediate wins and threats
    /// but not forks.
    pub medium_depth: u8,
}

impl SearchConfig {
    /// Search depth used for `difficulty`, `None` for the random policy.
    pub fn depth(&self, difficulty: Difficulty) -> Option<u8> {
        match difficulty {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(self.medium_depth.min(FULL_DEPTH)),
            Difficulty::Hard => Some(FULL_DEPTH),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            medium_depth: DEFAULT_MEDIUM_DEPTH,
        }
    }
}

/// Selects a move for `symbol` on `board`.
///
/// Returns `None` only when no square is free. The returned position is
/// always legal on `board`.
#[instrument(level = "debug", skip(board, rng), fields(board = %board.display()))]
pub fn best_move<R: Rng + ?Sized>(
    board: &Board,
    symbol: Player,
    difficulty: Difficulty,
    config: &SearchConfig,
    rng: &mut R,
) -> Option<Position> {
    let choice = match config.depth(difficulty) {
        None => legal_moves(board).choose(rng).copied(),
        Some(depth) => {
            let analysis = analyze(board, symbol, depth);
            debug!(score = analysis.score, nodes = analysis.nodes, "Search finished");
            analysis.best
        }
    };
    debug!(?choice, "Computer move selected");
    choice
}

/// A computer player: search settings plus its own random source.
#[derive(Debug, Clone)]
pub struct Solver<R = StdRng> {
    config: SearchConfig,
    rng: R,
}

impl Solver<StdRng> {
    /// Solver with default settings seeded from the operating system.
    pub fn from_entropy(config: SearchConfig) -> Self {
        Self::new(config, StdRng::from_os_rng())
    }

    /// Solver with default settings and a fixed seed, for reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SearchConfig::default(), StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Solver<R> {
    /// Creates a solver from settings and a random source.
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Selects a move for `symbol`; see [`best_move`].
    pub fn best_move(&mut self, board: &Board, symbol: Player, difficulty: Difficulty) -> Option<Position> {
        best_move(board, symbol, difficulty, &self.config, &mut self.rng)
    }
}
