use super::types::{Mark, WinningLine};

pub const BOARD_SIZE: usize = 9;

/// Rows, then columns, then diagonals. The order decides which line gets reported.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win_with_line(cells: &[Mark; BOARD_SIZE]) -> Option<WinningLine> {
    for line in WINNING_LINES {
        let [a, b, c] = line;
        let mark = cells[a];
        if mark == Mark::Empty {
            continue;
        }
        if cells[b] == mark && cells[c] == mark {
            let side = mark.side()?;
            return Some(WinningLine::new(side, line));
        }
    }
    None
}
