use std::fmt;
use std::str::FromStr;

use super::error::TicTacToeError;
use super::types::{GameOutcome, Mark, Side, WinningLine};
use super::win_detector::{BOARD_SIZE, check_win_with_line};

/// 3x3 grid indexed 0-8 in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Mark; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// X moves first, so X is to move whenever the counts are level.
    pub fn side_to_move(&self) -> Side {
        if self.count(Mark::X) > self.count(Mark::O) {
            Side::O
        } else {
            Side::X
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.winning_line().map(|line| line.side)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.cells)
    }

    pub fn outcome(&self) -> GameOutcome {
        if let Some(side) = self.winner() {
            GameOutcome::Win(side)
        } else if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn apply_move(&self, index: usize, side: Side) -> Result<Board, TicTacToeError> {
        let mut next = *self;
        next.place(index, side)?;
        Ok(next)
    }

    pub(crate) fn place(&mut self, index: usize, side: Side) -> Result<(), TicTacToeError> {
        if self.outcome().is_terminal() {
            return Err(TicTacToeError::GameAlreadyTerminal);
        }

        let Some(cell) = self.cells.get_mut(index) else {
            return Err(TicTacToeError::OutOfBounds { index });
        };

        if *cell != Mark::Empty {
            return Err(TicTacToeError::CellOccupied { index });
        }

        *cell = side.mark();
        Ok(())
    }

    /// Unchecked write used by the search on its scratch copy.
    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }
}

impl FromStr for Board {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| *c != '\n' && *c != '|').collect();
        if chars.len() != BOARD_SIZE {
            return Err(TicTacToeError::InvalidBoardLength { got: chars.len() });
        }

        let mut cells = [Mark::Empty; BOARD_SIZE];
        for (position, character) in chars.into_iter().enumerate() {
            cells[position] = match character {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '-' | ' ' | '_' => Mark::Empty,
                _ => return Err(TicTacToeError::InvalidCellCharacter { character, position }),
            };
        }

        let board = Board { cells };
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);
        if x_count.abs_diff(o_count) > 1 {
            return Err(TicTacToeError::InvalidPieceCounts { x_count, o_count });
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(3).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty_and_in_progress() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.outcome(), GameOutcome::InProgress);
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.side_to_move(), Side::X);
    }

    #[test]
    fn test_apply_move_sets_cell_and_leaves_original() {
        let empty = Board::new();
        let next = empty.apply_move(4, Side::X).unwrap();
        assert_eq!(next.cell(4), Some(Mark::X));
        assert!(empty.is_empty());
        assert_eq!(next.side_to_move(), Side::O);
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        let err = Board::new().apply_move(9, Side::X).unwrap_err();
        assert_eq!(err, TicTacToeError::OutOfBounds { index: 9 });
        assert!(err.is_invalid_move());
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let board = board("X........");
        let err = board.apply_move(0, Side::O).unwrap_err();
        assert_eq!(err, TicTacToeError::CellOccupied { index: 0 });
        assert!(err.is_invalid_move());
    }

    #[test]
    fn test_apply_move_rejects_terminal_board() {
        let board = board("XXXOO....");
        let err = board.apply_move(5, Side::O).unwrap_err();
        assert_eq!(err, TicTacToeError::GameAlreadyTerminal);
        assert!(!err.is_invalid_move());
    }

    #[test]
    fn test_outcome_win() {
        let board = board("OX.OX.O.X");
        assert_eq!(board.outcome(), GameOutcome::Win(Side::O));
        assert_eq!(board.winning_line().unwrap().cells, [0, 3, 6]);
    }

    #[test]
    fn test_outcome_draw() {
        let board = board("XOXXOOOXX");
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), GameOutcome::Draw);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_win_on_full_board_is_not_a_draw() {
        let board = board("XOXOXOOXX");
        assert!(board.is_full());
        assert_eq!(board.outcome(), GameOutcome::Win(Side::X));
    }

    #[test]
    fn test_legal_moves_ascending() {
        let board = board("X.O.X.O..");
        assert_eq!(board.legal_moves(), vec![1, 3, 5, 7, 8]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO".parse::<Board>().unwrap_err(),
            TicTacToeError::InvalidBoardLength { got: 2 }
        );
        assert_eq!(
            "XO..Z....".parse::<Board>().unwrap_err(),
            TicTacToeError::InvalidCellCharacter { character: 'Z', position: 4 }
        );
        assert_eq!(
            "XXX......".parse::<Board>().unwrap_err(),
            TicTacToeError::InvalidPieceCounts { x_count: 3, o_count: 0 }
        );
    }

    #[test]
    fn test_parse_accepts_rows_separated_by_pipes() {
        let board = board("X.O|.X.|..O");
        assert_eq!(board.cell(0), Some(Mark::X));
        assert_eq!(board.cell(2), Some(Mark::O));
        assert_eq!(board.cell(8), Some(Mark::O));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let original = board("X.O.X.O..");
        let printed = original.to_string();
        assert_eq!(printed, "X.O\n.X.\nO..");
        assert_eq!(board(&printed), original);
    }
}
