use common::games::tictactoe::{BOARD_SIZE, Mark, MatchSnapshot};

use crate::state::ClientCommand;

const GRID_SIDE: usize = 3;

pub struct BoardUi {
    last_hover: Option<usize>,
}

impl BoardUi {
    const MIN_CELL_SIZE: f32 = 60.0;
    const MAX_CELL_SIZE: f32 = 140.0;
    const LINE_WIDTH: f32 = 2.0;
    const MARK_WIDTH: f32 = 5.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn cell_size(available: egui::Vec2) -> f32 {
        let side = available.x.min(available.y) / GRID_SIDE as f32;
        side.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    fn cell_rect(board_rect: egui::Rect, index: usize, cell_size: f32) -> egui::Rect {
        let x = (index % GRID_SIDE) as f32;
        let y = (index / GRID_SIDE) as f32;
        egui::Rect::from_min_size(
            egui::pos2(board_rect.left() + x * cell_size, board_rect.top() + y * cell_size),
            egui::vec2(cell_size, cell_size),
        )
    }

    fn index_at(board_rect: egui::Rect, pos: egui::Pos2, cell_size: f32) -> Option<usize> {
        if !board_rect.contains(pos) {
            return None;
        }
        let x = ((pos.x - board_rect.left()) / cell_size) as usize;
        let y = ((pos.y - board_rect.top()) / cell_size) as usize;
        (x < GRID_SIDE && y < GRID_SIDE).then_some(y * GRID_SIDE + x)
    }

    fn cell_highlight(snapshot: &MatchSnapshot, index: usize) -> Option<egui::Color32> {
        snapshot
            .winning_line
            .filter(|line| line.contains(index))
            .map(|_| egui::Color32::from_rgb(190, 235, 190))
    }

    /// Returns the click as a command when the human may play that cell.
    pub fn render(&mut self, ui: &mut egui::Ui, snapshot: &MatchSnapshot) -> Option<ClientCommand> {
        let cell_size = Self::cell_size(ui.available_size());
        let board_side = cell_size * GRID_SIDE as f32;

        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(board_side, board_side), egui::Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for index in 0..BOARD_SIZE {
            if let Some(color) = Self::cell_highlight(snapshot, index) {
                painter.rect_filled(Self::cell_rect(rect, index, cell_size), 0.0, color);
            }
        }

        for i in 0..=GRID_SIDE {
            let offset = i as f32 * cell_size;
            let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK);
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                stroke,
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                stroke,
            );
        }

        for index in 0..BOARD_SIZE {
            let cell_rect = Self::cell_rect(rect, index, cell_size);
            match snapshot.board.cell(index) {
                Some(Mark::X) => Self::draw_x(painter, cell_rect),
                Some(Mark::O) => Self::draw_o(painter, cell_rect),
                _ => {}
            }
        }

        let accepts_input = !snapshot.outcome.is_terminal() && !snapshot.is_computer_turn();
        if !accepts_input {
            self.last_hover = None;
            return None;
        }

        self.last_hover = response
            .hover_pos()
            .and_then(|pos| Self::index_at(rect, pos, cell_size))
            .filter(|&index| snapshot.board.cell(index) == Some(Mark::Empty));

        if let Some(index) = self.last_hover {
            painter.rect_filled(
                Self::cell_rect(rect, index, cell_size),
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
            );
        }

        if response.clicked() {
            return self.last_hover.map(|index| ClientCommand::PlaceMark { index });
        }
        None
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.2;
        let stroke = egui::Stroke::new(Self::MARK_WIDTH, egui::Color32::from_rgb(220, 50, 50));

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let radius = rect.width() / 2.0 - rect.width() * 0.2;
        let stroke = egui::Stroke::new(Self::MARK_WIDTH, egui::Color32::from_rgb(50, 50, 220));
        painter.circle_stroke(rect.center(), radius, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{MatchMode, MatchState, Side};

    #[test]
    fn test_index_at_maps_row_major() {
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(300.0, 300.0));
        assert_eq!(BoardUi::index_at(rect, egui::pos2(15.0, 15.0), 100.0), Some(0));
        assert_eq!(BoardUi::index_at(rect, egui::pos2(305.0, 15.0), 100.0), Some(2));
        assert_eq!(BoardUi::index_at(rect, egui::pos2(150.0, 250.0), 100.0), Some(7));
        assert_eq!(BoardUi::index_at(rect, egui::pos2(5.0, 15.0), 100.0), None);
    }

    #[test]
    fn test_only_winning_cells_are_highlighted() {
        let mut state = MatchState::new(MatchMode::TwoPlayer);
        for (side, index) in [(Side::X, 2), (Side::O, 0), (Side::X, 4), (Side::O, 1), (Side::X, 6)] {
            state.place_mark(side, index).unwrap();
        }
        let snapshot = state.snapshot();

        let highlighted: Vec<usize> = (0..BOARD_SIZE)
            .filter(|&index| BoardUi::cell_highlight(&snapshot, index).is_some())
            .collect();
        assert_eq!(highlighted, vec![2, 4, 6]);
    }

    #[test]
    fn test_no_highlight_while_in_progress() {
        let snapshot = MatchState::new(MatchMode::TwoPlayer).snapshot();
        assert!((0..BOARD_SIZE).all(|index| BoardUi::cell_highlight(&snapshot, index).is_none()));
    }

    #[test]
    fn test_cell_rect_round_trips_index() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(240.0, 240.0));
        for index in 0..BOARD_SIZE {
            let cell = BoardUi::cell_rect(rect, index, 80.0);
            assert_eq!(BoardUi::index_at(rect, cell.center(), 80.0), Some(index));
        }
    }
}
