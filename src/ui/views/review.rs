use egui::{Button, CentralPanel, Color32, Context, RichText, ScrollArea};

use crate::PrepApp;
use crate::engine::session::Answer;

pub fn ui_review(app: &mut PrepApp, ctx: &Context) {
    let Some(topic) = app.current_topic().cloned() else {
        app.back_to_dashboard();
        return;
    };
    let last = app.last_attempt_for(&topic.id).cloned();

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 680.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    ui.set_width(panel_width);

                    ui.heading(format!("Review — {}", topic.name));
                    ui.add_space(8.0);

                    let Some(last) = last else {
                        ui.label("No completed attempts for this topic yet.");
                        ui.add_space(12.0);
                        if ui
                            .add_sized([panel_width / 3.0, 36.0], Button::new("🏠 Dashboard"))
                            .clicked()
                        {
                            app.back_to_dashboard();
                        }
                        return;
                    };

                    ui.label(
                        RichText::new(format!(
                            "Last attempt · score {} · accuracy {:.1}%",
                            last.score,
                            last.accuracy()
                        ))
                        .weak(),
                    );
                    ui.add_space(8.0);

                    ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| {
                            for (pos, id) in last.working_set_ids.iter().enumerate() {
                                // Vanished content is silently left out,
                                // same as everywhere else.
                                let Some(question) =
                                    topic.questions.iter().find(|q| q.id == *id)
                                else {
                                    continue;
                                };
                                let answer =
                                    last.answers.iter().find(|a| a.question_id == *id);

                                ui.group(|ui| {
                                    ui.set_width(panel_width * 0.95);
                                    ui.strong(format!("{}. {}", pos + 1, question.prompt));
                                    ui.add_space(4.0);
                                    for (i, option) in question.options.iter().enumerate() {
                                        ui.label(option_text(
                                            i,
                                            option,
                                            question.correct_option,
                                            answer,
                                        ));
                                    }
                                    ui.add_space(2.0);
                                    match answer {
                                        Some(a) if !a.attempted => {
                                            ui.label(
                                                RichText::new("⏭ Skipped")
                                                    .color(Color32::YELLOW),
                                            );
                                        }
                                        None => {
                                            ui.label(RichText::new("Not attempted").weak());
                                        }
                                        _ => {}
                                    }
                                    if let Some(explanation) = &question.explanation {
                                        ui.label(
                                            RichText::new(explanation).italics().weak(),
                                        );
                                    }
                                });
                                ui.add_space(6.0);
                            }
                        });

                    ui.add_space(10.0);
                    if ui
                        .add_sized([panel_width / 3.0, 36.0], Button::new("🏠 Dashboard"))
                        .clicked()
                    {
                        app.back_to_dashboard();
                    }
                });
        });
    });
}

fn option_text(
    index: usize,
    option: &str,
    correct_option: usize,
    answer: Option<&Answer>,
) -> RichText {
    let letter = (b'A' + index as u8) as char;
    let picked = answer
        .map(|a| a.selected_option_index == Some(index))
        .unwrap_or(false);
    let text = format!("{letter}.  {option}");

    if index == correct_option {
        let suffix = if picked { "  ✔ your answer" } else { "  ✔" };
        RichText::new(format!("{text}{suffix}")).color(Color32::from_rgb(87, 195, 110))
    } else if picked {
        RichText::new(format!("{text}  ✘ your answer")).color(Color32::from_rgb(229, 106, 106))
    } else {
        RichText::new(text).weak()
    }
}
