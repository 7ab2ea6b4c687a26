use common::games::tictactoe::{MatchMode, MatchSession, MatchSettings};
use common::{SessionId, log};
use tokio::sync::mpsc;

use crate::broadcaster::LocalBroadcaster;
use crate::config::{Config, ConfigManager, FileContentConfigProvider};
use crate::state::{AppState, ClientCommand, SharedState};

/// Owns the match session for the lifetime of the window.
pub async fn local_game_task(
    shared_state: SharedState,
    settings: MatchSettings,
    config_manager: ConfigManager<FileContentConfigProvider, Config>,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
) {
    let session_id = SessionId::new(format!(
        "local_{}",
        chrono::Local::now().format("%Y%m%d%H%M%S")
    ));
    let session = MatchSession::new(session_id, MatchMode::TwoPlayer, settings);

    let runner = session.clone();
    let broadcaster = LocalBroadcaster::new(shared_state.clone());
    let run_handle = tokio::spawn(async move {
        runner.run(broadcaster).await;
    });

    while let Some(command) = command_rx.recv().await {
        match command {
            ClientCommand::StartMatch { mode } => {
                session.start_match(mode).await;
                shared_state.enter_game(session.snapshot().await);
                remember_mode(&config_manager, mode);
            }

            ClientCommand::PlaceMark { index } => {
                let before = session.snapshot().await;
                if session.submit_human_move(index).await {
                    let after = session.snapshot().await;
                    shared_state.update_snapshot(after);
                    shared_state.add_event(format!("{} played cell {}", before.turn, index + 1));
                }
            }

            ClientCommand::Restart => {
                session.restart().await;
                shared_state.update_snapshot(session.snapshot().await);
            }

            ClientCommand::Back => {
                // Idle two-player match: invalidates any pending computer move.
                session.start_match(MatchMode::TwoPlayer).await;
                shared_state.set_state(AppState::ModeSelection);
            }
        }
    }

    session.shutdown();
    if let Err(e) = run_handle.await {
        log!("Match session task failed: {}", e);
    }
}

fn remember_mode(config_manager: &ConfigManager<FileContentConfigProvider, Config>, mode: MatchMode) {
    let mut config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config: {}", e);
            return;
        }
    };

    if config.last_mode == Some(mode) {
        return;
    }

    config.last_mode = Some(mode);
    if let Err(e) = config_manager.set_config(&config) {
        log!("Failed to save config: {}", e);
    }
}
