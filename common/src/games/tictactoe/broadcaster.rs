use std::future::Future;

use tokio::sync::mpsc;

use super::game_state::{MatchResult, MatchSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    StateChanged(MatchSnapshot),
    ComputerMoved { index: usize, snapshot: MatchSnapshot },
    MatchOver(MatchResult),
}

/// Receives state changes from a running session.
pub trait MatchBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: MatchSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_computer_move(
        &self,
        index: usize,
        snapshot: MatchSnapshot,
    ) -> impl Future<Output = ()> + Send;

    fn broadcast_match_over(&self, result: MatchResult) -> impl Future<Output = ()> + Send;
}

#[derive(Clone)]
pub struct ChannelBroadcaster {
    tx: mpsc::UnboundedSender<MatchEvent>,
}

impl ChannelBroadcaster {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MatchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl MatchBroadcaster for ChannelBroadcaster {
    async fn broadcast_state(&self, snapshot: MatchSnapshot) {
        let _ = self.tx.send(MatchEvent::StateChanged(snapshot));
    }

    async fn broadcast_computer_move(&self, index: usize, snapshot: MatchSnapshot) {
        let _ = self.tx.send(MatchEvent::ComputerMoved { index, snapshot });
    }

    async fn broadcast_match_over(&self, result: MatchResult) {
        let _ = self.tx.send(MatchEvent::MatchOver(result));
    }
}
