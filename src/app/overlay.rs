//! Text overlay: title, current mode, loading progress and hints.

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect};

use galaxy_tree::interaction::SceneMode;

use super::GalaxyApp;

const TITLE_COLOR: Color32 = Color32::from_rgb(255, 243, 176);
const HINT_COLOR: Color32 = Color32::from_gray(150);

impl GalaxyApp {
    pub fn draw_overlay(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let left = rect.left_top() + egui::vec2(24.0, 20.0);

        painter.text(left, Align2::LEFT_TOP, "Galaxy Tree", FontId::proportional(26.0), TITLE_COLOR);

        let state = self.stage.state();
        let status = match (state.mode, &state.focused) {
            (SceneMode::Tree, _) => "tree".to_string(),
            (SceneMode::Galaxy, None) => "galaxy".to_string(),
            (SceneMode::Galaxy, Some(id)) => format!("galaxy · {}", id),
        };
        painter.text(
            left + egui::vec2(0.0, 34.0),
            Align2::LEFT_TOP,
            status,
            FontId::monospace(13.0),
            HINT_COLOR,
        );

        let pending = self.loader.pending_count();
        if pending > 0 {
            painter.text(
                left + egui::vec2(0.0, 52.0),
                Align2::LEFT_TOP,
                format!("loading {} photos…", pending),
                FontId::monospace(12.0),
                HINT_COLOR,
            );
        }

        if !self.show_help {
            return;
        }
        let hint = match state.mode {
            SceneMode::Tree => "double-click the tree to explode  ·  drag to orbit  ·  scroll to zoom  ·  H hides this",
            SceneMode::Galaxy => "click a photo to bring it forward  ·  double-click empty space to rebuild the tree",
        };
        painter.text(
            rect.center_bottom() - egui::vec2(0.0, 24.0),
            Align2::CENTER_BOTTOM,
            hint,
            FontId::proportional(14.0),
            HINT_COLOR,
        );
    }
}
