use common::games::tictactoe::{MatchMode, Side};

use crate::state::{AppState, ClientCommand};

const BUTTON_SIZE: [f32; 2] = [200.0, 40.0];

pub enum MenuAction {
    Navigate(AppState),
    Send(ClientCommand),
}

fn menu_button(ui: &mut egui::Ui, text: &str) -> bool {
    ui.add_sized(BUTTON_SIZE, egui::Button::new(text)).clicked()
}

pub fn render_home(ui: &mut egui::Ui) -> Option<MenuAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading(egui::RichText::new("Tic-Tac-Toe").size(32.0));
        ui.add_space(40.0);
        if menu_button(ui, "Start Game") {
            action = Some(MenuAction::Navigate(AppState::ModeSelection));
        }
    });
    action
}

pub fn render_mode_selection(ui: &mut egui::Ui, last_mode: Option<MatchMode>) -> Option<MenuAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Select Mode");
        ui.add_space(30.0);

        if menu_button(ui, "Two Players") {
            action = Some(MenuAction::Send(ClientCommand::StartMatch {
                mode: MatchMode::TwoPlayer,
            }));
        }
        ui.add_space(10.0);
        if menu_button(ui, "One Player") {
            action = Some(MenuAction::Navigate(AppState::SideSelection));
        }

        if let Some(mode) = last_mode {
            ui.add_space(20.0);
            if menu_button(ui, &format!("Again: {}", mode)) {
                action = Some(MenuAction::Send(ClientCommand::StartMatch { mode }));
            }
        }

        ui.add_space(20.0);
        if ui.button("Back").clicked() {
            action = Some(MenuAction::Navigate(AppState::Home));
        }
    });
    action
}

pub fn render_side_selection(ui: &mut egui::Ui) -> Option<MenuAction> {
    let mut action = None;
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Choose Your Side");
        ui.label("X moves first");
        ui.add_space(30.0);

        for (text, human_side) in [("Play as X", Side::X), ("Play as O", Side::O)] {
            if menu_button(ui, text) {
                action = Some(MenuAction::Send(ClientCommand::StartMatch {
                    mode: MatchMode::SinglePlayer { human_side },
                }));
            }
            ui.add_space(10.0);
        }

        ui.add_space(10.0);
        if ui.button("Back").clicked() {
            action = Some(MenuAction::Navigate(AppState::ModeSelection));
        }
    });
    action
}
