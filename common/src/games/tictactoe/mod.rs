mod board;
mod bot_controller;
mod broadcaster;
mod error;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotInput, SearchReport, analyze, best_move, calculate_move, exhaustive_best_move,
};
pub use broadcaster::{ChannelBroadcaster, MatchBroadcaster, MatchEvent};
pub use error::TicTacToeError;
pub use game_state::{MatchResult, MatchSnapshot, MatchState};
pub use session::MatchSession;
pub use settings::{DEFAULT_COMPUTER_MOVE_DELAY_MS, MAX_COMPUTER_MOVE_DELAY_MS, MatchSettings};
pub use types::{GameOutcome, Mark, MatchMode, Side, WinningLine};
pub use win_detector::{BOARD_SIZE, WINNING_LINES, check_win_with_line};
