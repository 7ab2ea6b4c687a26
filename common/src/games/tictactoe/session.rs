use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, Notify};

use crate::{MatchGeneration, SessionId, log, log_debug};
use super::bot_controller::{BotInput, calculate_move};
use super::broadcaster::MatchBroadcaster;
use super::game_state::{MatchSnapshot, MatchState};
use super::settings::MatchSettings;
use super::types::{MatchMode, Side};

/// Command side of a match. Cheap to clone; all clones drive the same match.
#[derive(Clone)]
pub struct MatchSession {
    session_id: SessionId,
    state: Arc<Mutex<MatchState>>,
    turn_notify: Arc<Notify>,
    shutdown: Arc<AtomicBool>,
    settings: MatchSettings,
}

impl MatchSession {
    pub fn new(session_id: SessionId, mode: MatchMode, settings: MatchSettings) -> Self {
        Self {
            session_id,
            state: Arc::new(Mutex::new(MatchState::new(mode))),
            turn_notify: Arc::new(Notify::new()),
            shutdown: Arc::new(AtomicBool::new(false)),
            settings,
        }
    }

    pub async fn start_match(&self, mode: MatchMode) {
        let mut state = self.state.lock().await;
        state.reset(mode);
        log!(
            "[session:{}] Match {} started ({})",
            self.session_id,
            state.generation(),
            mode
        );
        drop(state);
        self.turn_notify.notify_one();
    }

    /// Same mode, fresh board.
    pub async fn restart(&self) {
        let mut state = self.state.lock().await;
        let mode = state.mode();
        state.reset(mode);
        log!(
            "[session:{}] Match restarted as {} ({})",
            self.session_id,
            state.generation(),
            mode
        );
        drop(state);
        self.turn_notify.notify_one();
    }

    /// Returns whether the move was accepted. Rejected moves change nothing.
    pub async fn submit_human_move(&self, index: usize) -> bool {
        let mut state = self.state.lock().await;

        if state.is_computer_turn() {
            log_debug!(
                "[session:{}] Ignoring move at {}: waiting for the computer",
                self.session_id,
                index
            );
            return false;
        }

        let side = state.turn();
        match state.place_mark(side, index) {
            Ok(outcome) => {
                log_debug!(
                    "[session:{}] {} played {} ({:?})",
                    self.session_id,
                    side,
                    index,
                    outcome
                );
                drop(state);
                self.turn_notify.notify_one();
                true
            }
            Err(e) if e.is_invalid_move() => {
                log_debug!(
                    "[session:{}] Player {} failed to place mark at {}: {}",
                    self.session_id,
                    side,
                    index,
                    e
                );
                false
            }
            Err(e) => {
                log_debug!(
                    "[session:{}] Ignoring move at {} from {}: {}",
                    self.session_id,
                    index,
                    side,
                    e
                );
                false
            }
        }
    }

    pub async fn snapshot(&self) -> MatchSnapshot {
        self.state.lock().await.snapshot()
    }

    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.turn_notify.notify_one();
    }

    /// Publishes every state change and plays the computer's turns until shut down.
    pub async fn run(&self, broadcaster: impl MatchBroadcaster) {
        let mut announced: Option<MatchGeneration> = None;

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            let snapshot = self.snapshot().await;
            broadcaster.broadcast_state(snapshot).await;

            if let Some(result) = snapshot.result()
                && announced != Some(result.generation)
            {
                log!("[session:{}] {}", self.session_id, result.message());
                broadcaster.broadcast_match_over(result).await;
                announced = Some(result.generation);
            }

            if snapshot.is_computer_turn() {
                tokio::select! {
                    _ = tokio::time::sleep(self.settings.computer_move_delay()) => {
                        if let Some((index, snapshot)) = self.play_computer_turn(snapshot.generation).await {
                            broadcaster.broadcast_computer_move(index, snapshot).await;
                        }
                    }
                    _ = self.turn_notify.notified() => {}
                }
            } else {
                self.turn_notify.notified().await;
            }
        }

        log!("[session:{}] Session stopped", self.session_id);
    }

    async fn play_computer_turn(
        &self,
        generation: MatchGeneration,
    ) -> Option<(usize, MatchSnapshot)> {
        let bot_input = {
            let state = self.state.lock().await;
            if state.generation() != generation || !state.is_computer_turn() {
                log_debug!(
                    "[session:{}] Skipping computer turn scheduled for {}",
                    self.session_id,
                    generation
                );
                return None;
            }
            BotInput::from_match_state(&state)
        };

        let side = bot_input.side;
        let calculated_move = tokio::task::spawn_blocking(move || calculate_move(&bot_input)).await;

        let index = match calculated_move {
            Ok(Ok(index)) => index,
            Ok(Err(e)) => panic!("computer asked to move without a legal move: {}", e),
            Err(e) => {
                log!("[session:{}] Search task failed: {}", self.session_id, e);
                return None;
            }
        };

        self.apply_computer_move(generation, side, index).await
    }

    /// Applies a finished search unless the match moved on while it ran.
    async fn apply_computer_move(
        &self,
        generation: MatchGeneration,
        side: Side,
        index: usize,
    ) -> Option<(usize, MatchSnapshot)> {
        let mut state = self.state.lock().await;
        if state.generation() != generation {
            log!(
                "[session:{}] Discarding computer move {} from {}; match is now {}",
                self.session_id,
                index,
                generation,
                state.generation()
            );
            return None;
        }

        match state.place_mark(side, index) {
            Ok(_) => {
                log_debug!("[session:{}] Computer ({}) played {}", self.session_id, side, index);
                Some((index, state.snapshot()))
            }
            Err(e) => {
                log!(
                    "[session:{}] Computer ({}) failed to place mark at {}: {}",
                    self.session_id,
                    side,
                    index,
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::games::tictactoe::{
        ChannelBroadcaster, GameOutcome, Mark, MatchEvent, MatchResult, best_move,
    };

    const WAIT: Duration = Duration::from_secs(5);

    fn start_session(
        mode: MatchMode,
        delay_ms: u64,
    ) -> (MatchSession, mpsc::UnboundedReceiver<MatchEvent>, JoinHandle<()>) {
        let session = MatchSession::new(
            SessionId::new("test".to_string()),
            mode,
            MatchSettings::with_delay_ms(delay_ms),
        );
        let (broadcaster, rx) = ChannelBroadcaster::new();
        let runner = session.clone();
        let handle = tokio::spawn(async move { runner.run(broadcaster).await });
        (session, rx, handle)
    }

    async fn next_computer_move(rx: &mut mpsc::UnboundedReceiver<MatchEvent>) -> (usize, MatchSnapshot) {
        tokio::time::timeout(WAIT, async {
            loop {
                match rx.recv().await {
                    Some(MatchEvent::ComputerMoved { index, snapshot }) => return (index, snapshot),
                    Some(_) => continue,
                    None => panic!("session closed"),
                }
            }
        })
        .await
        .expect("no computer move")
    }

    async fn next_match_over(rx: &mut mpsc::UnboundedReceiver<MatchEvent>) -> MatchResult {
        tokio::time::timeout(WAIT, async {
            loop {
                match rx.recv().await {
                    Some(MatchEvent::MatchOver(result)) => return result,
                    Some(_) => continue,
                    None => panic!("session closed"),
                }
            }
        })
        .await
        .expect("match did not end")
    }

    #[tokio::test]
    async fn test_two_player_moves_alternate() {
        let (session, _rx, handle) = start_session(MatchMode::TwoPlayer, 0);

        assert!(session.submit_human_move(4).await);
        assert!(session.submit_human_move(0).await);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.cell(4), Some(Mark::X));
        assert_eq!(snapshot.board.cell(0), Some(Mark::O));
        assert_eq!(snapshot.turn, Side::X);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_human_move_is_ignored() {
        let (session, _rx, handle) = start_session(MatchMode::TwoPlayer, 0);

        assert!(session.submit_human_move(4).await);
        let before = session.snapshot().await;
        assert!(!session.submit_human_move(4).await);
        assert!(!session.submit_human_move(42).await);
        assert_eq!(session.snapshot().await, before);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_computer_replies_to_human() {
        let (session, mut rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::X }, 0);

        assert!(session.submit_human_move(0).await);
        let (index, snapshot) = next_computer_move(&mut rx).await;

        assert_eq!(snapshot.board.cell(index), Some(Mark::O));
        assert_eq!(snapshot.board.count(Mark::O), 1);
        assert_eq!(snapshot.turn, Side::X);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_computer_opens_when_human_plays_o() {
        let (session, mut rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::O }, 0);

        let (index, snapshot) = next_computer_move(&mut rx).await;
        assert_eq!(index, 0);
        assert_eq!(snapshot.board.cell(0), Some(Mark::X));
        assert_eq!(snapshot.turn, Side::O);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_human_cannot_move_for_computer() {
        let (session, _rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::O }, 1_000);

        assert!(!session.submit_human_move(4).await);
        assert!(session.snapshot().await.board.is_empty());

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_keeps_mode_and_clears_board() {
        let mode = MatchMode::SinglePlayer { human_side: Side::X };
        let (session, mut rx, handle) = start_session(mode, 0);

        assert!(session.submit_human_move(4).await);
        next_computer_move(&mut rx).await;
        let before = session.snapshot().await;

        session.restart().await;
        let snapshot = session.snapshot().await;
        assert!(snapshot.board.is_empty());
        assert_eq!(snapshot.turn, Side::X);
        assert_eq!(snapshot.mode, mode);
        assert_ne!(snapshot.generation, before.generation);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_lets_computer_open_again() {
        let (session, mut rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::O }, 0);

        next_computer_move(&mut rx).await;
        assert!(session.submit_human_move(4).await);
        next_computer_move(&mut rx).await;

        session.restart().await;
        let (_, snapshot) = next_computer_move(&mut rx).await;
        assert_eq!(snapshot.board.count(Mark::X), 1);
        assert_eq!(snapshot.board.count(Mark::O), 0);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_computer_move_dropped_after_mode_change() {
        let (session, _rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::O }, 150);

        tokio::time::sleep(Duration::from_millis(50)).await;
        session.start_match(MatchMode::TwoPlayer).await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        let snapshot = session.snapshot().await;
        assert!(snapshot.board.is_empty());
        assert_eq!(snapshot.mode, MatchMode::TwoPlayer);

        session.shutdown();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_computer_move_is_discarded() {
        let session = MatchSession::new(
            SessionId::new("stale".to_string()),
            MatchMode::SinglePlayer { human_side: Side::O },
            MatchSettings::with_delay_ms(0),
        );
        let old_generation = session.snapshot().await.generation;

        session.restart().await;
        assert!(session.play_computer_turn(old_generation).await.is_none());
        assert!(session.snapshot().await.board.is_empty());

        let current = session.snapshot().await.generation;
        let (index, snapshot) = session.play_computer_turn(current).await.unwrap();
        assert_eq!(snapshot.board.cell(index), Some(Mark::X));
    }

    #[tokio::test]
    async fn test_search_result_dropped_when_restart_lands_mid_search() {
        let session = MatchSession::new(
            SessionId::new("mid-search".to_string()),
            MatchMode::SinglePlayer { human_side: Side::O },
            MatchSettings::with_delay_ms(0),
        );
        let scheduled = session.snapshot().await;
        let index = best_move(&scheduled.board, Side::X).unwrap();

        session.restart().await;
        assert!(
            session
                .apply_computer_move(scheduled.generation, Side::X, index)
                .await
                .is_none()
        );
        assert!(session.snapshot().await.board.is_empty());

        let current = session.snapshot().await.generation;
        let (applied, snapshot) = session
            .apply_computer_move(current, Side::X, index)
            .await
            .unwrap();
        assert_eq!(applied, index);
        assert_eq!(snapshot.board.cell(index), Some(Mark::X));
    }

    #[tokio::test]
    async fn test_full_match_against_computer_ends() {
        let (session, mut rx, handle) =
            start_session(MatchMode::SinglePlayer { human_side: Side::X }, 0);

        loop {
            let snapshot = session.snapshot().await;
            if snapshot.outcome.is_terminal() {
                break;
            }
            if snapshot.is_computer_turn() {
                tokio::task::yield_now().await;
                continue;
            }
            let index = snapshot.board.legal_moves()[0];
            assert!(session.submit_human_move(index).await);
        }

        let result = next_match_over(&mut rx).await;
        assert_ne!(result.outcome, GameOutcome::Win(Side::X));
        assert!(!session.submit_human_move(8).await);

        session.shutdown();
        handle.await.unwrap();
    }
}
