use thiserror::Error;

use super::types::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TicTacToeError {
    #[error("invalid move: position {index} is out of bounds (must be 0-8)")]
    OutOfBounds { index: usize },

    #[error("invalid move: position {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("game already over")]
    GameAlreadyTerminal,

    #[error("no legal moves available")]
    NoLegalMove,

    #[error("not {side}'s turn")]
    NotYourTurn { side: Side },

    #[error("board string has {got} cells, expected 9")]
    InvalidBoardLength { got: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidCellCharacter { character: char, position: usize },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must differ by at most one)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },
}

impl TicTacToeError {
    /// Out-of-range and occupied targets. Other errors mean the move came at the wrong time.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            TicTacToeError::OutOfBounds { .. } | TicTacToeError::CellOccupied { .. }
        )
    }
}
