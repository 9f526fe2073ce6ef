use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use flappy_evo::simulation::world::Snapshot;
use std::collections::VecDeque;

use super::ui::{PANEL_WIDTH, UIState};

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &UIState,
    snapshot: &Snapshot<'_>,
    generation: u32,
) {
    egui::SidePanel::right("stats_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(egui_ctx, |ui| {
            ui.heading("Training");
            ui.separator();

            ui.label(format!("Generation: {}", generation));
            ui.label(format!(
                "Alive: {}/{}",
                snapshot.birds.len(),
                snapshot.population
            ));
            ui.label(format!("Score: {}", snapshot.score));
            ui.label(format!("Tick: {}", snapshot.tick));
            ui.label(format!("Best score: {}", state.best_score));

            if let Some(stats) = &state.last_stats {
                ui.separator();
                ui.label(format!("Last generation ({})", stats.generation));
                ui.label(format!("  Best fitness: {:.2}", stats.best));
                ui.label(format!("  Mean fitness: {:.2}", stats.mean));
                ui.label(format!("  Std dev: {:.2}", stats.stdev));
            }

            ui.separator();
            ui.heading("Fitness Per Generation");
            draw_fitness_plot(ui, &state.best_history, &state.mean_history);

            ui.separator();
            ui.heading("Score Per Generation");
            draw_score_plot(ui, &state.score_history);
        });
}

fn draw_fitness_plot(
    ui: &mut egui::Ui,
    best_data: &VecDeque<(f64, f64)>,
    mean_data: &VecDeque<(f64, f64)>,
) {
    if best_data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("fitness_plot")
        .height(180.0)
        .show_axes([true, true])
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGeneration: {:.0}\nFitness: {:.2}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let best_points: PlotPoints = best_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(best_points)
                    .color(egui::Color32::from_rgb(255, 200, 80))
                    .name("Best"),
            );

            let mean_points: PlotPoints = mean_data.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(mean_points)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Mean"),
            );
        });
}

fn draw_score_plot(ui: &mut egui::Ui, data: &VecDeque<(f64, f64)>) {
    if data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
    Plot::new("score_plot")
        .height(150.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| format!("Generation: {:.0}\nScore: {:.0}", value.x, value.y))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(egui::Color32::from_rgb(100, 200, 100)));
        });
}
