use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::runner::Frontend;
use flappy_evo::simulation::world::Snapshot;
use macroquad::prelude::*;

use crate::graphics::{self, Textures};
use crate::ui::{self, UIState};

/// Draws every tick into the macroquad window and watches for quit input.
///
/// Presenting only records draw calls; the caller still has to await
/// `next_frame()` after each step.
pub struct WindowFrontend<'a> {
    pub textures: &'a Textures,
    pub params: &'a Params,
    pub ui_state: &'a UIState,
    pub generation: u32,
}

impl Frontend for WindowFrontend<'_> {
    fn quit_requested(&mut self) -> bool {
        is_quit_requested() || is_key_pressed(KeyCode::Escape)
    }

    fn present(&mut self, snapshot: &Snapshot<'_>) {
        graphics::draw_scene(snapshot, self.textures, self.params);
        ui::draw_ui(self.ui_state, snapshot, self.generation);
        ui::process_egui();
    }
}
