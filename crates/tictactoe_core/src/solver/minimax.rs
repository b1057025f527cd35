//! Minimax search with alpha-beta pruning.
//!
//! Scores are relative to the maximizing symbol: a win for it is worth
//! `10 - depth`, a loss `depth - 10` and a draw `0`, so quicker wins and
//! slower losses are preferred. Non-terminal leaves at the depth horizon
//! score `0`.

use crate::rules::{evaluate, legal_moves, GameResult};
use crate::{Board, Player, Position};
use tracing::{instrument, trace};

/// Deepest possible search: one ply per square.
pub const FULL_DEPTH: u8 = 9;

const WIN_SCORE: i32 = 10;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    /// Best move for the maximizing symbol, `None` on a full board.
    pub best: Option<Position>,
    /// Minimax value of `best`.
    pub score: i32,
    /// Positions visited, root excluded.
    pub nodes: u64,
}

struct Search {
    maximizer: Player,
    max_depth: u8,
    nodes: u64,
}

/// Searches `board` with `symbol` to move and maximizing, up to `max_depth` plies.
///
/// Ties are broken toward the lowest index.
#[instrument(level = "debug", skip(board), fields(board = %board.display()))]
pub fn analyze(board: &Board, symbol: Player, max_depth: u8) -> Analysis {
    let mut search = Search {
        maximizer: symbol,
        max_depth,
        nodes: 0,
    };

    let mut best: Option<(Position, i32)> = None;
    let mut alpha = i32::MIN;
    for pos in legal_moves(board) {
        let child = board.with(pos, symbol);
        let score = search.alpha_beta(&child, symbol.opponent(), 1, alpha, i32::MAX);
        trace!(position = %pos, score, "Scored root move");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
        alpha = alpha.max(score);
    }

    Analysis {
        best: best.map(|(pos, _)| pos),
        score: best.map_or(0, |(_, score)| score),
        nodes: search.nodes,
    }
}

impl Search {
    fn alpha_beta(&mut self, board: &Board, to_move: Player, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        match evaluate(board) {
            GameResult::Win { player, .. } if player == self.maximizer => return WIN_SCORE - i32::from(depth),
            GameResult::Win { .. } => return i32::from(depth) - WIN_SCORE,
            GameResult::Draw => return 0,
            GameResult::Ongoing => {}
        }
        if depth >= self.max_depth {
            return 0;
        }

        let moves = legal_moves(board);
        if to_move == self.maximizer {
            let mut value = i32::MIN;
            for pos in moves {
                let score = self.alpha_beta(&board.with(pos, to_move), to_move.opponent(), depth + 1, alpha, beta);
                value = value.max(score);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break; // Beta cutoff
                }
            }
            value
        } else {
            let mut value = i32::MAX;
            for pos in moves {
                let score = self.alpha_beta(&board.with(pos, to_move), to_move.opponent(), depth + 1, alpha, beta);
                value = value.min(score);
                beta = beta.min(value);
                if beta <= alpha {
                    break; // Alpha cutoff
                }
            }
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nodes in the complete game tree below the empty board.
    const FULL_TREE_NODES: u64 = 549_945;

    #[test]
    fn test_empty_board_is_a_draw_with_perfect_play() {
        let analysis = analyze(&Board::new(), Player::X, FULL_DEPTH);
        assert_eq!(analysis.score, 0);
        assert!(analysis.best.is_some());
    }

    #[test]
    fn test_pruning_skips_most_of_the_tree() {
        let analysis = analyze(&Board::new(), Player::X, FULL_DEPTH);
        assert!(
            analysis.nodes < FULL_TREE_NODES / 5,
            "visited {} nodes",
            analysis.nodes
        );
    }

    #[test]
    fn test_prefers_the_fastest_win() {
        // O O _ / X X _ / _ _ _  with O to move: 2 wins at depth 1.
        let board = Board::new()
            .with(Position::TopLeft, Player::O)
            .with(Position::TopCenter, Player::O)
            .with(Position::MiddleLeft, Player::X)
            .with(Position::Center, Player::X);
        let analysis = analyze(&board, Player::O, FULL_DEPTH);
        assert_eq!(analysis.best, Some(Position::TopRight));
        assert_eq!(analysis.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_scores_are_relative_to_the_maximizer() {
        // Same position with colours swapped and X maximizing.
        let board = Board::new()
            .with(Position::TopLeft, Player::X)
            .with(Position::TopCenter, Player::X)
            .with(Position::MiddleLeft, Player::O)
            .with(Position::Center, Player::O);
        let analysis = analyze(&board, Player::X, FULL_DEPTH);
        assert_eq!(analysis.best, Some(Position::TopRight));
        assert_eq!(analysis.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Position::ALL
            .iter()
            .enumerate()
            .fold(Board::new(), |b, (i, pos)| {
                // X O X / X O O / O X X
                let player = if [0, 2, 3, 7, 8].contains(&i) { Player::X } else { Player::O };
                b.with(*pos, player)
            });
        let analysis = analyze(&board, Player::O, FULL_DEPTH);
        assert_eq!(analysis.best, None);
        assert_eq!(analysis.nodes, 0);
    }

    #[test]
    fn test_horizon_scores_quiet_moves_as_zero() {
        // X _ _ / _ O _ / _ _ X with O to move. A corner loses to a fork, an
        // edge holds the draw. At depth 1 nothing is decided yet.
        let board = Board::new()
            .with(Position::TopLeft, Player::X)
            .with(Position::Center, Player::O)
            .with(Position::BottomRight, Player::X);
        let shallow = analyze(&board, Player::O, 1);
        assert_eq!(shallow.best, Some(Position::TopCenter));
        assert_eq!(shallow.score, 0);

        let deep = analyze(&board, Player::O, FULL_DEPTH);
        assert_eq!(deep.score, 0);
        assert!(matches!(
            deep.best,
            Some(Position::TopCenter | Position::MiddleLeft | Position::MiddleRight | Position::BottomCenter)
        ));
    }
}
