//! Tests for the computer opponent.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tictactoe_core::{
    Board, Difficulty, GameResult, Player, Position, SearchConfig, Solver, WinningLine, best_move, evaluate,
    expected_turn, is_legal,
};

fn board_from(cells: [Option<Player>; 9]) -> Board {
    Board::try_from(cells.to_vec()).unwrap()
}

const X: Option<Player> = Some(Player::X);
const O: Option<Player> = Some(Player::O);
const E: Option<Player> = None;

/// Plays a full game from the empty board and returns the final result.
fn play_out(solver: &mut Solver, x: Difficulty, o: Difficulty) -> GameResult {
    play_from(Board::new(), solver, x, o)
}

/// Plays `board` to the end, X at difficulty `x` and O at `o`.
fn play_from(mut board: Board, solver: &mut Solver, x: Difficulty, o: Difficulty) -> GameResult {
    while evaluate(&board) == GameResult::Ongoing {
        let player = expected_turn(&board).unwrap();
        let difficulty = if player == Player::X { x } else { o };
        let pos = solver.best_move(&board, player, difficulty).unwrap();
        assert!(is_legal(&board, pos.to_index()));
        board = board.with(pos, player);
    }
    evaluate(&board)
}

#[test]
fn test_hard_vs_hard_is_a_draw() {
    let mut solver = Solver::seeded(1);
    assert_eq!(play_out(&mut solver, Difficulty::Hard, Difficulty::Hard), GameResult::Draw);
}

#[test]
fn test_hard_takes_immediate_win() {
    let board = board_from([O, O, E, X, X, E, E, E, E]);
    let mut solver = Solver::seeded(2);
    assert_eq!(solver.best_move(&board, Player::O, Difficulty::Hard), Some(Position::TopRight));
}

#[test]
fn test_hard_blocks_imminent_loss() {
    let board = board_from([X, X, E, O, E, E, E, E, E]);
    let mut solver = Solver::seeded(3);
    assert_eq!(solver.best_move(&board, Player::O, Difficulty::Hard), Some(Position::TopRight));
}

#[test]
fn test_hard_plays_either_symbol() {
    let board = board_from([O, O, E, X, X, E, E, E, E]);
    let mut solver = Solver::seeded(4);
    // X to move wins on the middle row just as O would on the top row.
    assert_eq!(solver.best_move(&board, Player::X, Difficulty::Hard), Some(Position::MiddleRight));
}

#[test]
fn test_hard_never_loses_to_random_play() {
    let mut solver = Solver::seeded(5);
    for _ in 0..20 {
        let as_o = play_out(&mut solver, Difficulty::Easy, Difficulty::Hard);
        assert_ne!(as_o.winner(), Some(Player::X), "hard lost as O");

        let as_x = play_out(&mut solver, Difficulty::Hard, Difficulty::Easy);
        assert_ne!(as_x.winner(), Some(Player::O), "hard lost as X");
    }
}

#[test]
fn test_medium_takes_win_and_blocks() {
    let mut solver = Solver::seeded(6);

    let win = board_from([O, O, E, X, X, E, E, E, E]);
    assert_eq!(solver.best_move(&win, Player::O, Difficulty::Medium), Some(Position::TopRight));

    let threat = board_from([X, X, E, O, E, E, E, E, E]);
    assert_eq!(solver.best_move(&threat, Player::O, Difficulty::Medium), Some(Position::TopRight));
}

#[test]
fn test_medium_is_deterministic() {
    let board = board_from([X, E, E, E, E, E, E, E, E]);
    let first = Solver::seeded(7).best_move(&board, Player::O, Difficulty::Medium);
    let second = Solver::seeded(8).best_move(&board, Player::O, Difficulty::Medium);
    assert_eq!(first, second);
}

#[test]
fn test_medium_misses_what_hard_sees() {
    // Against a corner opening only the center holds the draw. Two plies
    // cannot see that, so medium falls back to the lowest index.
    let board = board_from([X, E, E, E, E, E, E, E, E]);
    let mut solver = Solver::seeded(12);
    assert_eq!(solver.best_move(&board, Player::O, Difficulty::Medium), Some(Position::TopCenter));
    assert_eq!(solver.best_move(&board, Player::O, Difficulty::Hard), Some(Position::Center));
}

#[test]
fn test_hard_beats_medium_after_corner_opening() {
    let board = board_from([X, E, E, E, E, E, E, E, E]);
    let mut solver = Solver::seeded(13);
    let result = play_from(board, &mut solver, Difficulty::Hard, Difficulty::Medium);
    let line = WinningLine::try_from([3usize, 4, 5]).unwrap();
    assert_eq!(result, GameResult::Win { player: Player::X, line });
}

#[test]
fn test_easy_only_picks_free_squares() {
    let board = board_from([X, O, X, E, O, E, E, X, E]);
    let mut solver = Solver::seeded(9);
    for _ in 0..50 {
        let pos = solver.best_move(&board, Player::O, Difficulty::Easy).unwrap();
        assert!(is_legal(&board, pos.to_index()), "picked occupied {:?}", pos);
    }
}

#[test]
fn test_easy_is_reproducible_with_same_seed() {
    let board = Board::new();
    let config = SearchConfig::default();
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let picks_a: Vec<_> = (0..10)
        .map(|_| best_move(&board, Player::X, Difficulty::Easy, &config, &mut a))
        .collect();
    let picks_b: Vec<_> = (0..10)
        .map(|_| best_move(&board, Player::X, Difficulty::Easy, &config, &mut b))
        .collect();
    assert_eq!(picks_a, picks_b);
}

#[test]
fn test_easy_covers_every_free_square() {
    let board = board_from([X, E, E, E, O, E, E, E, E]);
    let mut solver = Solver::seeded(10);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(solver.best_move(&board, Player::X, Difficulty::Easy).unwrap());
    }
    assert_eq!(seen.len(), 7);
}

#[test]
fn test_full_board_yields_no_move() {
    let board = board_from([X, O, X, X, O, O, O, X, X]);
    let mut solver = Solver::seeded(11);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert_eq!(solver.best_move(&board, Player::O, difficulty), None);
    }
}
