use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const DEFAULT_COMPUTER_MOVE_DELAY_MS: u64 = 500;
pub const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Pause before the computer's reply is applied. Presentation only.
    pub computer_move_delay_ms: u64,
}

impl MatchSettings {
    pub fn with_delay_ms(computer_move_delay_ms: u64) -> Self {
        Self {
            computer_move_delay_ms,
        }
    }

    pub fn computer_move_delay(&self) -> Duration {
        Duration::from_millis(self.computer_move_delay_ms)
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            computer_move_delay_ms: DEFAULT_COMPUTER_MOVE_DELAY_MS,
        }
    }
}

impl Validate for MatchSettings {
    fn validate(&self) -> Result<(), String> {
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {} (got {})",
                MAX_COMPUTER_MOVE_DELAY_MS, self.computer_move_delay_ms
            ));
        }
        Ok(())
    }
}
