use std::sync::{Arc, Mutex, MutexGuard};

use common::games::tictactoe::{Mark, MatchMode, MatchResult, MatchSnapshot, Side};
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub const EVENT_LOG_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    StartMatch { mode: MatchMode },
    PlaceMark { index: usize },
    Restart,
    Back,
}

#[derive(Debug, Clone)]
pub enum AppState {
    Home,
    ModeSelection,
    SideSelection,
    InGame {
        snapshot: MatchSnapshot,
        event_log: AllocRingBuffer<String>,
        popup: Option<MatchResult>,
    },
}

pub fn computer_move_event(side: Side, index: usize) -> String {
    format!("Computer ({}) played cell {}", side, index + 1)
}

/// UI-facing state, written by the local game task and read every frame.
#[derive(Clone)]
pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    repaint_ctx: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::Home)),
            repaint_ctx: Arc::new(Mutex::new(None)),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_repaint_context(&self, ctx: egui::Context) {
        *self
            .repaint_ctx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(ctx);
    }

    fn request_repaint(&self) {
        let ctx = self
            .repaint_ctx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(ctx) = ctx {
            ctx.request_repaint();
        }
    }

    pub fn set_state(&self, state: AppState) {
        *self.lock_state() = state;
        self.request_repaint();
    }

    pub fn get_state(&self) -> AppState {
        self.lock_state().clone()
    }

    /// The computer may already have opened by the time the screen switches.
    pub fn enter_game(&self, snapshot: MatchSnapshot) {
        let mut event_log = AllocRingBuffer::new(EVENT_LOG_SIZE);
        if let Some(index) = snapshot.last_move
            && let Some(side) = snapshot.mode.computer_side()
            && snapshot.board.cell(index) == Some(side.mark())
        {
            event_log.enqueue(computer_move_event(side, index));
        }

        self.set_state(AppState::InGame {
            snapshot,
            event_log,
            popup: None,
        });
    }

    /// Returns false for snapshots that are older than, or equal to, the one on screen.
    pub fn update_snapshot(&self, update: MatchSnapshot) -> bool {
        let mut state = self.lock_state();
        let AppState::InGame { snapshot, popup, .. } = &mut *state else {
            return false;
        };
        if update == *snapshot || update.generation < snapshot.generation {
            return false;
        }
        if update.generation == snapshot.generation
            && update.board.count(Mark::Empty) > snapshot.board.count(Mark::Empty)
        {
            return false;
        }
        if update.generation != snapshot.generation {
            *popup = None;
        }
        *snapshot = update;
        drop(state);
        self.request_repaint();
        true
    }

    pub fn add_event(&self, event: String) {
        let mut state = self.lock_state();
        if let AppState::InGame { event_log, .. } = &mut *state {
            event_log.enqueue(event);
        }
        drop(state);
        self.request_repaint();
    }

    pub fn show_result(&self, result: MatchResult) {
        let mut state = self.lock_state();
        if let AppState::InGame { snapshot, popup, .. } = &mut *state
            && snapshot.generation == result.generation
        {
            *popup = Some(result);
        }
        drop(state);
        self.request_repaint();
    }

    pub fn dismiss_popup(&self) {
        let mut state = self.lock_state();
        if let AppState::InGame { popup, .. } = &mut *state {
            *popup = None;
        }
    }
}
