use egui::{Color32, Context, Grid, RichText};

use crate::PrepApp;
use crate::ui::layout::{centered_panel, two_button_row};

pub fn ui_results(app: &mut PrepApp, ctx: &Context) {
    let Some(results) = app.last_results.clone() else {
        app.back_to_dashboard();
        return;
    };
    let topic_name = app
        .topic(&results.topic_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| results.topic_id.clone());
    let accuracy = results.accuracy();

    centered_panel(ctx, 420.0, 480.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Session Results");
            ui.label(&topic_name);
            ui.add_space(8.0);

            ui.label(RichText::new(salutation(accuracy)).strong());
            ui.add_space(10.0);

            ui.label(
                RichText::new(format!("{} / {}", results.score, results.max_score()))
                    .size(28.0)
                    .strong(),
            );
            ui.label(RichText::new("score").small().weak());
            ui.add_space(12.0);

            Grid::new("results_grid")
                .striped(true)
                .spacing([28.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Correct");
                    ui.strong("Wrong");
                    ui.strong("Skipped");
                    ui.strong("Accuracy");
                    ui.strong("Avg time");
                    ui.end_row();

                    ui.label(
                        RichText::new(results.correct.to_string())
                            .color(Color32::from_rgb(87, 195, 110)),
                    );
                    ui.label(
                        RichText::new(results.incorrect.to_string())
                            .color(Color32::from_rgb(229, 106, 106)),
                    );
                    ui.label(results.unattempted.to_string());
                    ui.label(format!("{accuracy:.1}%"));
                    ui.label(format!("{:.1}s", results.avg_time));
                    ui.end_row();
                });

            ui.add_space(16.0);
            let panel_width = ui.available_width().min(420.0);
            let (review, back) = two_button_row(ui, panel_width, "🔎 Review Answers", "🏠 Dashboard");
            if review {
                let topic_id = results.topic_id.clone();
                app.open_review(&topic_id);
            }
            if back {
                app.back_to_dashboard();
            }
        });
    });
}

fn salutation(accuracy: f64) -> &'static str {
    if accuracy >= 80.0 {
        "Excellent work! You are well prepared."
    } else if accuracy >= 60.0 {
        "Good job. A little more revision and you are there."
    } else if accuracy >= 40.0 {
        "A fair attempt. Revisit the must-study list for this topic."
    } else {
        "Keep practicing. Work through the study materials first."
    }
}
