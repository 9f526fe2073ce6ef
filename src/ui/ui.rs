use egui_macroquad::egui;
use flappy_evo::evolution::population::GenerationStats;
use flappy_evo::simulation::world::Snapshot;
use std::collections::VecDeque;

/// Width in pixels reserved for the stats panel to the right of the game.
pub const PANEL_WIDTH: f32 = 320.0;

const MAX_HISTORY_POINTS: usize = 500;

/// Per-generation history shown in the stats panel.
pub struct UIState {
    /// Best fitness per generation as `(generation, fitness)`.
    pub best_history: VecDeque<(f64, f64)>,
    /// Mean fitness per generation as `(generation, fitness)`.
    pub mean_history: VecDeque<(f64, f64)>,
    /// Final score of each finished run as `(run, score)`.
    pub score_history: VecDeque<(f64, f64)>,
    /// Highest score of any finished run.
    pub best_score: u32,
    /// Summary of the most recently bred generation.
    pub last_stats: Option<GenerationStats>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            best_history: VecDeque::new(),
            mean_history: VecDeque::new(),
            score_history: VecDeque::new(),
            best_score: 0,
            last_stats: None,
        }
    }

    pub fn record_generation(&mut self, stats: &GenerationStats) {
        let generation = f64::from(stats.generation);
        push_bounded(&mut self.best_history, (generation, stats.best));
        push_bounded(&mut self.mean_history, (generation, stats.mean));
        self.last_stats = Some(*stats);
    }

    pub fn record_score(&mut self, score: u32) {
        self.best_score = self.best_score.max(score);
        let generation = self
            .score_history
            .back()
            .map_or(0.0, |&(generation, _)| generation + 1.0);
        push_bounded(&mut self.score_history, (generation, f64::from(score)));
    }
}

fn push_bounded(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

pub fn draw_ui(state: &UIState, snapshot: &Snapshot<'_>, generation: u32) {
    egui_macroquad::ui(|egui_ctx| {
        // Configure brighter text and UI
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_panel(egui_ctx, state, snapshot, generation);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}
