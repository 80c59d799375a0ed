use egui::{Button, CentralPanel, Color32, Context, Grid, RichText, ScrollArea};

use crate::PrepApp;
use crate::model::QuizMode;

pub fn ui_dashboard(app: &mut PrepApp, ctx: &Context) {
    let overall = app.overall();
    let cards = app.topic_cards();

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 720.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    ui.set_width(panel_width);

                    ui.heading("AIIMS CRE Radiology Technician Prep");
                    ui.add_space(4.0);

                    if !app.message.is_empty() {
                        ui.label(RichText::new(&app.message).color(Color32::YELLOW).strong());
                        ui.add_space(4.0);
                    }

                    // Overall numbers across every topic with data
                    Grid::new("overall_grid")
                        .striped(true)
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            ui.strong("Score");
                            ui.strong("Attempted");
                            ui.strong("Accuracy");
                            ui.strong("Avg time");
                            ui.end_row();

                            ui.label(overall.score.to_string());
                            ui.label(format!(
                                "{} / {}",
                                overall.attempted, overall.total_questions
                            ));
                            ui.label(overall.accuracy_label());
                            ui.label(overall.avg_time_label());
                            ui.end_row();
                        });

                    ui.add_space(6.0);
                    ui.add(
                        egui::ProgressBar::new(overall.progress_fraction())
                            .desired_width(panel_width * 0.8)
                            .show_percentage(),
                    );

                    ui.add_space(6.0);
                    if ui.button("📅 Activity").clicked() {
                        app.heatmap_open = !app.heatmap_open;
                    }

                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(6.0);

                    ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            for card in &cards {
                                ui.group(|ui| {
                                    ui.set_width(panel_width * 0.95);
                                    ui.horizontal(|ui| {
                                        ui.strong(&card.name);
                                        ui.label(
                                            RichText::new(card.weightage_label)
                                                .small()
                                                .color(Color32::LIGHT_BLUE),
                                        );
                                        ui.label(
                                            RichText::new(format!("priority {}", card.priority))
                                                .small()
                                                .weak(),
                                        );
                                    });
                                    ui.horizontal(|ui| {
                                        ui.label(format!("{} questions", card.question_count));
                                        ui.label(format!("attempted {}", card.attempted));
                                        ui.label(format!("accuracy {}", card.accuracy_label()));
                                    });
                                    ui.horizontal(|ui| {
                                        if ui.button("▶ Start Quiz").clicked() {
                                            app.start_quiz(&card.id, QuizMode::Topic);
                                        }
                                        if ui.button("🔀 Random Order").clicked() {
                                            app.start_quiz(&card.id, QuizMode::Random);
                                        }
                                        if ui.button("📋 Attempt All").clicked() {
                                            app.start_quiz(&card.id, QuizMode::All);
                                        }
                                        if ui
                                            .add_enabled(
                                                card.has_attempts,
                                                Button::new("🔎 Review"),
                                            )
                                            .clicked()
                                        {
                                            app.open_review(&card.id);
                                        }
                                    });
                                });
                                ui.add_space(6.0);
                            }
                        });
                });
        });
    });

    if app.heatmap_open {
        activity_window(app, ctx);
    }
}

/// Attempts per UTC day, trailing thirteen weeks, GitHub-style cells.
fn activity_window(app: &mut PrepApp, ctx: &Context) {
    const DAYS: usize = 13 * 7;
    let counts = app.activity_by_day(DAYS);

    egui::Window::new("Activity")
        .collapsible(false)
        .resizable(false)
        .open(&mut app.heatmap_open)
        .show(ctx, |ui| {
            let cell = 13.0;
            let (response, painter) = ui.allocate_painter(
                egui::vec2(13.0 * cell, 7.0 * cell),
                egui::Sense::hover(),
            );
            let origin = response.rect.min;
            for (i, count) in counts.iter().enumerate() {
                let col = (i / 7) as f32;
                let row = (i % 7) as f32;
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(col * cell, row * cell),
                    egui::vec2(cell - 2.0, cell - 2.0),
                );
                painter.rect_filled(rect, egui::CornerRadius::same(2), heat_color(*count));
            }
            ui.add_space(4.0);
            ui.label(
                RichText::new("Questions attempted per day, last 13 weeks.")
                    .small()
                    .weak(),
            );
        });
}

fn heat_color(count: u32) -> Color32 {
    match count {
        0 => Color32::from_gray(45),
        1..=4 => Color32::from_rgb(14, 68, 41),
        5..=14 => Color32::from_rgb(0, 109, 50),
        15..=29 => Color32::from_rgb(38, 166, 65),
        _ => Color32::from_rgb(57, 211, 83),
    }
}
