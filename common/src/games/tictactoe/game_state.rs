use crate::MatchGeneration;
use super::board::Board;
use super::error::TicTacToeError;
use super::types::{GameOutcome, MatchMode, Side, WinningLine};

const FIRST_SIDE: Side = Side::X;

/// Board, turn and mode of the match in play. Owned by one session.
#[derive(Debug, Clone)]
pub struct MatchState {
    board: Board,
    turn: Side,
    mode: MatchMode,
    generation: MatchGeneration,
    last_move: Option<usize>,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub board: Board,
    pub turn: Side,
    pub mode: MatchMode,
    pub outcome: GameOutcome,
    pub winning_line: Option<WinningLine>,
    pub generation: MatchGeneration,
    pub last_move: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: GameOutcome,
    pub winning_line: Option<WinningLine>,
    pub generation: MatchGeneration,
}

impl MatchState {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            board: Board::new(),
            turn: FIRST_SIDE,
            mode,
            generation: MatchGeneration::default(),
            last_move: None,
        }
    }

    /// Fresh board, X to move, next generation. Pending computer moves become stale.
    pub fn reset(&mut self, mode: MatchMode) {
        self.board = Board::new();
        self.turn = FIRST_SIDE;
        self.mode = mode;
        self.generation = self.generation.next();
        self.last_move = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn generation(&self) -> MatchGeneration {
        self.generation
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    pub fn is_active(&self) -> bool {
        !self.outcome().is_terminal()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.is_active() && self.mode.is_computer_turn(self.turn)
    }

    pub fn place_mark(&mut self, side: Side, index: usize) -> Result<GameOutcome, TicTacToeError> {
        if !self.is_active() {
            return Err(TicTacToeError::GameAlreadyTerminal);
        }

        if side != self.turn {
            return Err(TicTacToeError::NotYourTurn { side });
        }

        self.board.place(index, side)?;
        self.last_move = Some(index);

        let outcome = self.outcome();
        if !outcome.is_terminal() {
            self.turn = self.turn.opponent();
        }

        Ok(outcome)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board,
            turn: self.turn,
            mode: self.mode,
            outcome: self.outcome(),
            winning_line: self.board.winning_line(),
            generation: self.generation,
            last_move: self.last_move,
        }
    }

    pub fn result(&self) -> Option<MatchResult> {
        self.snapshot().result()
    }
}

impl MatchSnapshot {
    pub fn status_text(&self) -> String {
        match self.outcome {
            GameOutcome::Win(side) => format!("{} wins!", side),
            GameOutcome::Draw => "It's a draw!".to_string(),
            GameOutcome::InProgress => format!("Player {}'s turn", self.turn),
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.outcome.is_terminal() && self.mode.is_computer_turn(self.turn)
    }

    pub fn result(&self) -> Option<MatchResult> {
        if !self.outcome.is_terminal() {
            return None;
        }

        Some(MatchResult {
            outcome: self.outcome,
            winning_line: self.winning_line,
            generation: self.generation,
        })
    }
}

impl MatchResult {
    pub fn message(&self) -> String {
        match self.outcome {
            GameOutcome::Win(side) => format!("{} wins!", side),
            _ => "It's a draw!".to_string(),
        }
    }
}
