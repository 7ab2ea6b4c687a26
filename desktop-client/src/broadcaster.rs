use common::games::tictactoe::{MatchBroadcaster, MatchResult, MatchSnapshot};

use crate::state::{SharedState, computer_move_event};

#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl MatchBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: MatchSnapshot) {
        self.shared_state.update_snapshot(snapshot);
    }

    async fn broadcast_computer_move(&self, index: usize, snapshot: MatchSnapshot) {
        let Some(side) = snapshot.mode.computer_side() else {
            return;
        };
        if self.shared_state.update_snapshot(snapshot) {
            self.shared_state.add_event(computer_move_event(side, index));
        }
    }

    async fn broadcast_match_over(&self, result: MatchResult) {
        self.shared_state.add_event(result.message());
        self.shared_state.show_result(result);
    }
}
