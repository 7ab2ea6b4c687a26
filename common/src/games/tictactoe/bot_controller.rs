use crate::log_debug;
use super::board::Board;
use super::error::TicTacToeError;
use super::game_state::MatchState;
use super::types::{Mark, Side};
use super::win_detector::BOARD_SIZE;

const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub side: Side,
}

impl BotInput {
    pub fn from_match_state(state: &MatchState) -> Self {
        Self {
            board: *state.board(),
            side: state.turn(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub index: usize,
    pub value: i32,
    pub nodes_visited: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pruning {
    AlphaBeta,
    Exhaustive,
}

pub fn calculate_move(input: &BotInput) -> Result<usize, TicTacToeError> {
    best_move(&input.board, input.side)
}

/// Optimal move for `side`, lowest index among equally valued moves.
pub fn best_move(board: &Board, side: Side) -> Result<usize, TicTacToeError> {
    analyze(board, side).map(|report| report.index)
}

pub fn analyze(board: &Board, side: Side) -> Result<SearchReport, TicTacToeError> {
    let report = search_root(board, side, Pruning::AlphaBeta)?;
    log_debug!(
        "search for {}: move {} value {} after {} nodes",
        side,
        report.index,
        report.value,
        report.nodes_visited
    );
    Ok(report)
}

/// Plain minimax over the whole tree. Reference for the pruned search.
pub fn exhaustive_best_move(board: &Board, side: Side) -> Result<SearchReport, TicTacToeError> {
    search_root(board, side, Pruning::Exhaustive)
}

fn search_root(board: &Board, side: Side, pruning: Pruning) -> Result<SearchReport, TicTacToeError> {
    if board.winner().is_some() {
        return Err(TicTacToeError::GameAlreadyTerminal);
    }

    let available_moves = board.legal_moves();
    if available_moves.is_empty() {
        return Err(TicTacToeError::NoLegalMove);
    }

    let mut scratch = *board;
    let mut nodes_visited = 0u64;
    let mut best: Option<(usize, i32)> = None;

    for index in available_moves {
        scratch.set(index, side.mark());

        // Each root move gets the full window so its value is exact.
        let value = minimax(
            &mut scratch,
            side,
            0,
            false,
            i32::MIN,
            i32::MAX,
            pruning,
            &mut nodes_visited,
        );

        scratch.set(index, Mark::Empty);

        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((index, value));
        }
    }

    debug_assert_eq!(&scratch, board);

    let (index, value) = best.ok_or(TicTacToeError::NoLegalMove)?;
    Ok(SearchReport {
        index,
        value,
        nodes_visited,
    })
}

fn minimax(
    board: &mut Board,
    bot_side: Side,
    depth: i32,
    is_maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    pruning: Pruning,
    nodes_visited: &mut u64,
) -> i32 {
    *nodes_visited += 1;

    if let Some(winner) = board.winner() {
        return if winner == bot_side {
            WIN_SCORE - depth
        } else {
            -WIN_SCORE + depth
        };
    }

    if board.is_full() {
        return 0;
    }

    let mover = if is_maximizing {
        bot_side
    } else {
        bot_side.opponent()
    };

    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for index in 0..BOARD_SIZE {
        if board.cells()[index] != Mark::Empty {
            continue;
        }

        board.set(index, mover.mark());
        let eval = minimax(
            board,
            bot_side,
            depth + 1,
            !is_maximizing,
            alpha,
            beta,
            pruning,
            nodes_visited,
        );
        board.set(index, Mark::Empty);

        if is_maximizing {
            best = best.max(eval);
            alpha = alpha.max(best);
        } else {
            best = best.min(eval);
            beta = beta.min(best);
        }

        if pruning == Pruning::AlphaBeta && beta <= alpha {
            break;
        }
    }

    best
}
