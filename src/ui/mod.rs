// UI module - egui side panel drawn next to the game area

mod stats;
mod ui;

// Re-export the public interface
pub use ui::{PANEL_WIDTH, UIState, draw_ui, process_egui};
