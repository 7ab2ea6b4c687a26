mod board;
mod menu;

use common::games::tictactoe::{MatchMode, MatchResult, MatchSnapshot};
use ringbuffer::{AllocRingBuffer, RingBuffer};
use tokio::sync::mpsc;

use crate::state::{AppState, ClientCommand, SharedState};
use board::BoardUi;
use menu::MenuAction;

pub struct TicTacToeApp {
    shared_state: SharedState,
    command_tx: mpsc::UnboundedSender<ClientCommand>,
    last_mode: Option<MatchMode>,
    board_ui: BoardUi,
}

impl TicTacToeApp {
    pub fn new(
        shared_state: SharedState,
        command_tx: mpsc::UnboundedSender<ClientCommand>,
        last_mode: Option<MatchMode>,
    ) -> Self {
        Self {
            shared_state,
            command_tx,
            last_mode,
            board_ui: BoardUi::new(),
        }
    }

    fn send(&mut self, command: ClientCommand) {
        if let ClientCommand::StartMatch { mode } = command {
            self.last_mode = Some(mode);
        }
        let _ = self.command_tx.send(command);
    }

    fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::Navigate(state) => self.shared_state.set_state(state),
            MenuAction::Send(command) => self.send(command),
        }
    }

    fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        snapshot: &MatchSnapshot,
        event_log: &AllocRingBuffer<String>,
    ) {
        ui.heading(snapshot.status_text());
        if snapshot.is_computer_turn() {
            ui.label("Computer is thinking...");
        }
        ui.separator();

        ui.horizontal_top(|ui| {
            let board_area = egui::vec2(ui.available_width() * 0.7, ui.available_height() - 60.0);
            let clicked = ui
                .allocate_ui(board_area, |ui| self.board_ui.render(ui, snapshot))
                .inner;
            if let Some(command) = clicked {
                self.send(command);
            }

            ui.separator();

            ui.vertical(|ui| {
                ui.label(egui::RichText::new(format!("Mode: {}", snapshot.mode)).strong());
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("event_log_scroll")
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for event in event_log.iter() {
                            ui.label(event);
                        }
                    });
            });
        });

        ui.separator();
        ui.horizontal(|ui| {
            let restart_label = if snapshot.outcome.is_terminal() {
                "Play Again"
            } else {
                "Restart Game"
            };
            if ui.button(restart_label).clicked() {
                self.send(ClientCommand::Restart);
            }
            if ui.button("Back").clicked() {
                self.send(ClientCommand::Back);
            }
        });
    }

    /// Close restarts; a click outside only hides the popup.
    fn render_result_popup(&mut self, ctx: &egui::Context, result: &MatchResult) {
        let mut restart = false;
        let window = egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(result.message());
                    ui.add_space(10.0);
                    restart = ui.button("Close").clicked();
                });
            });

        let clicked_outside = window.is_some_and(|window| window.response.clicked_elsewhere());
        if restart || clicked_outside {
            self.shared_state.dismiss_popup();
        }
        if restart {
            self.send(ClientCommand::Restart);
        }
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.shared_state.get_state();

        egui::CentralPanel::default().show(ctx, |ui| {
            let action = match &state {
                AppState::Home => menu::render_home(ui),
                AppState::ModeSelection => menu::render_mode_selection(ui, self.last_mode),
                AppState::SideSelection => menu::render_side_selection(ui),
                AppState::InGame { snapshot, event_log, .. } => {
                    self.render_game(ui, snapshot, event_log);
                    None
                }
            };
            if let Some(action) = action {
                self.apply(action);
            }
        });

        if let AppState::InGame { popup: Some(result), .. } = &state {
            self.render_result_popup(ctx, result);
        }
    }
}
