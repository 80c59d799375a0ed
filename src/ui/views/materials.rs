use egui::{CentralPanel, Color32, Context, Grid, RichText, ScrollArea, TextEdit};

use crate::PrepApp;
use crate::clock;
use crate::materials::{self, MaterialEntry};

pub fn ui_materials(app: &mut PrepApp, ctx: &Context) {
    let entries: Vec<MaterialEntry> = app.materials.clone();

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 680.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    ui.set_width(panel_width);

                    ui.horizontal(|ui| {
                        ui.heading("Study Materials");
                        if ui.button("⟳ Refresh").clicked() {
                            app.refresh_materials();
                        }
                    });
                    if let Some(err) = app.materials_error.clone() {
                        ui.label(RichText::new(err).color(Color32::YELLOW));
                    }
                    ui.add_space(8.0);

                    ScrollArea::vertical()
                        .max_height(280.0)
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            for group in materials::MATERIAL_GROUPS {
                                let in_group: Vec<&MaterialEntry> =
                                    entries.iter().filter(|e| e.group == group).collect();
                                ui.strong(group_title(group));
                                if in_group.is_empty() {
                                    ui.label(RichText::new("No files found.").weak());
                                }
                                for entry in in_group {
                                    ui.horizontal(|ui| {
                                        ui.label(
                                            RichText::new(entry.kind.label()).small().weak(),
                                        );
                                        ui.label(&entry.name);
                                        ui.label(
                                            RichText::new(entry.size_label()).small().weak(),
                                        );
                                        #[cfg(not(target_arch = "wasm32"))]
                                        if ui.button("Open").clicked() {
                                            app.open_material(ctx, &entry.url);
                                        }
                                    });
                                }
                                ui.add_space(8.0);
                            }
                        });

                    ui.separator();
                    ui.add_space(6.0);
                    mock_tracker_block(app, ui, panel_width);
                });
        });
    });
}

fn group_title(group: &str) -> &'static str {
    match group {
        "mock_papers" => "Mock Papers",
        _ => "Study Notes",
    }
}

/// Manual mock-paper score log: validated inputs, running average,
/// clear-all.
fn mock_tracker_block(app: &mut PrepApp, ui: &mut egui::Ui, panel_width: f32) {
    ui.heading("Mock Paper Tracker");
    match materials::mock_average(&app.mock_scores) {
        Some(avg) => {
            ui.label(format!(
                "{} papers logged · average {avg:.1}%",
                app.mock_scores.len()
            ));
        }
        None => {
            ui.label(RichText::new("No mock papers logged yet.").weak());
        }
    }
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.add(
            TextEdit::singleline(&mut app.mock_score_input)
                .desired_width(80.0)
                .hint_text("score"),
        );
        ui.label("/");
        ui.add(
            TextEdit::singleline(&mut app.mock_total_input)
                .desired_width(80.0)
                .hint_text("total"),
        );
        if ui.button("➕ Add").clicked() {
            app.add_mock_score();
        }
        if ui.button("🗑 Clear all").clicked() {
            app.clear_mock_scores();
        }
    });
    if let Some(err) = &app.mock_input_error {
        ui.label(RichText::new(err).color(Color32::from_rgb(229, 106, 106)));
    }
    ui.add_space(6.0);

    if !app.mock_scores.is_empty() {
        ScrollArea::vertical()
            .id_salt("mock_scores")
            .max_height(160.0)
            .show(ui, |ui| {
                Grid::new("mock_scores_grid")
                    .striped(true)
                    .spacing([24.0, 2.0])
                    .min_col_width(panel_width / 5.0)
                    .show(ui, |ui| {
                        ui.strong("Date");
                        ui.strong("Score");
                        ui.strong("Percent");
                        ui.end_row();
                        for entry in &app.mock_scores {
                            ui.label(clock::format_ymd(entry.date_epoch_ms));
                            ui.label(format!("{} / {}", entry.score, entry.total));
                            ui.label(format!(
                                "{:.1}%",
                                entry.score as f64 / entry.total as f64 * 100.0
                            ));
                            ui.end_row();
                        }
                    });
            });
    }
}
