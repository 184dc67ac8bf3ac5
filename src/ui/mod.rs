pub mod puzzle_scene;

use crate::app::App;
use ratatui::Frame;

/// Main UI drawing function
pub fn draw_ui(frame: &mut Frame, app: &App) {
    puzzle_scene::render_puzzle_scene(frame, frame.size(), app);
}
