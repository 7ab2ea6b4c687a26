use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn side(&self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Side::X),
            Mark::O => Some(Side::O),
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    X,
    O,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    pub fn mark(&self) -> Mark {
        match self {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::X => write!(f, "X"),
            Side::O => write!(f, "O"),
        }
    }
}

/// Derived from the board on every query, never stored on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Win(Side),
    Draw,
}

impl GameOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOutcome::Win(side) => Some(*side),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinningLine {
    pub side: Side,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(side: Side, cells: [usize; 3]) -> Self {
        Self { side, cells }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    TwoPlayer,
    SinglePlayer { human_side: Side },
}

impl MatchMode {
    /// The side played by the search engine, if any.
    pub fn computer_side(&self) -> Option<Side> {
        match self {
            MatchMode::TwoPlayer => None,
            MatchMode::SinglePlayer { human_side } => Some(human_side.opponent()),
        }
    }

    pub fn is_computer_turn(&self, turn: Side) -> bool {
        self.computer_side() == Some(turn)
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::TwoPlayer => write!(f, "two players"),
            MatchMode::SinglePlayer { human_side } => write!(f, "one player as {}", human_side),
        }
    }
}
