//! Application state and logic.

use super::input::Action;
use tictactoe_core::{Board, Difficulty, GameResult, Move, Player, Position, Solver, evaluate, is_legal};
use tracing::{debug, info, instrument, warn};

/// Symbol the person at the keyboard plays.
pub const HUMAN: Player = Player::X;

/// Local game of human (X) against the solver (O).
#[derive(Debug)]
pub struct App {
    board: Board,
    cursor: Position,
    difficulty: Difficulty,
    solver: Solver,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(solver: Solver, difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            cursor: Position::Center,
            difficulty,
            solver,
            status_message: your_turn(difficulty),
            should_quit: false,
        }
    }

    /// Gets the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the computer's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Evaluated result of the board.
    pub fn result(&self) -> GameResult {
        evaluate(&self.board)
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies a key action.
    pub fn handle(&mut self, action: Action) {
        debug!(?action, "Handling action");
        match action {
            Action::Cursor(pos) => self.cursor = pos,
            Action::Place(pos) => self.place(pos),
            Action::CycleDifficulty => {
                self.difficulty = self.difficulty.next();
                info!(difficulty = %self.difficulty, "Difficulty changed");
                self.status_message = format!("Computer difficulty: {}", self.difficulty);
            }
            Action::Restart => self.restart(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Places the human's mark and lets the computer answer.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn place(&mut self, pos: Position) {
        self.cursor = pos;
        if self.result().is_over() {
            self.status_message = "Game is over. Press 'r' to play again.".to_string();
            return;
        }
        if !is_legal(&self.board, pos.to_index()) {
            debug!(position = %pos, "Square taken");
            self.status_message = format!("{} is taken. Pick another square.", pos.label());
            return;
        }

        let mv = Move::new(HUMAN, pos);
        self.board = mv.apply(&self.board);
        info!(%mv, "Human played");
        if !self.result().is_over() {
            self.computer_turn();
        }
        self.status_message = self.describe();
    }

    /// Restarts the game, keeping the difficulty.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.board = Board::new();
        self.cursor = Position::Center;
        self.status_message = your_turn(self.difficulty);
    }

    fn computer_turn(&mut self) {
        let computer = HUMAN.opponent();
        match self.solver.best_move(&self.board, computer, self.difficulty) {
            Some(reply) => {
                let mv = Move::new(computer, reply);
                self.board = mv.apply(&self.board);
                info!(%mv, "Computer played");
            }
            None => warn!("Computer found no move on an open board"),
        }
    }

    fn describe(&self) -> String {
        match self.result() {
            GameResult::Win { player, .. } if player == HUMAN => {
                "You win! Press 'r' to restart or 'q' to quit.".to_string()
            }
            GameResult::Win { .. } => "Computer wins! Press 'r' to restart or 'q' to quit.".to_string(),
            GameResult::Draw => "Game ended in a draw! Press 'r' to restart or 'q' to quit.".to_string(),
            GameResult::Ongoing => your_turn(self.difficulty),
        }
    }
}

fn your_turn(difficulty: Difficulty) -> String {
    format!("Your move ({}). Computer: {}", HUMAN, difficulty)
}
