use egui::{Button, CentralPanel, Color32, Context, RichText, ScrollArea};

use crate::PrepApp;
use crate::engine::session::SessionPhase;
use crate::model::{Question, QuizMode};

struct QuizVm {
    topic_name: String,
    mode: QuizMode,
    phase: SessionPhase,
    index: usize,
    total: usize,
    question: Question,
    selected: Option<usize>,
    remaining: u32,
    progress: f32,
    is_correct: Option<bool>,
}

/// Immutable snapshot of what the frame draws; every click goes back
/// through the app actions.
fn snapshot(app: &PrepApp) -> Option<QuizVm> {
    let topic_name = app.current_topic()?.name.clone();
    let session = app.session.as_ref()?;
    let question = session.current_question()?.clone();
    let is_correct = session
        .answers
        .last()
        .filter(|a| a.question_id == question.id)
        .and_then(|a| a.is_correct);
    Some(QuizVm {
        topic_name,
        mode: session.mode,
        phase: session.phase,
        index: session.current_index,
        total: session.questions.len(),
        question,
        selected: session.selected_option,
        remaining: session.time_remaining,
        progress: session.progress_fraction(),
        is_correct,
    })
}

pub fn ui_quiz(app: &mut PrepApp, ctx: &Context) {
    let Some(vm) = snapshot(app) else {
        app.back_to_dashboard();
        return;
    };
    let counting = matches!(vm.phase, SessionPhase::Presenting | SessionPhase::Selected);
    let is_last = vm.index + 1 == vm.total;
    let next_label = if is_last { "🏁 Finish" } else { "Next ▶" };

    CentralPanel::default().show(ctx, |ui| {
        let max_width = 650.0;
        let panel_width = (ui.available_width() * 0.97).min(max_width);

        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(ui.visuals().window_fill())
                .inner_margin(egui::Margin::symmetric(16, 16))
                .show(ui, |ui| {
                    ui.set_width(panel_width);

                    ui.horizontal(|ui| {
                        ui.strong(&vm.topic_name);
                        ui.label(RichText::new(vm.mode.label()).small().weak());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(timer_text(vm.remaining, counting));
                            },
                        );
                    });
                    ui.add_space(4.0);
                    ui.add(
                        egui::ProgressBar::new(vm.progress)
                            .desired_width(panel_width)
                            .text(format!("Question {} of {}", vm.index + 1, vm.total)),
                    );
                    ui.add_space(10.0);

                    ScrollArea::vertical().max_height(140.0).show(ui, |ui| {
                        ui.label(RichText::new(&vm.question.prompt).size(16.0));
                    });
                    ui.add_space(10.0);

                    options_block(app, ui, &vm, counting, panel_width);
                    ui.add_space(10.0);

                    match vm.phase {
                        SessionPhase::Presenting | SessionPhase::Selected => {
                            ui.horizontal(|ui| {
                                ui.add_space((ui.available_width() - panel_width).max(0.0) / 2.0);
                                let btn_w = (panel_width - 8.0) / 2.0;
                                let submit = ui.add_enabled(
                                    vm.phase == SessionPhase::Selected,
                                    Button::new("✅ Submit").min_size([btn_w, 36.0].into()),
                                );
                                let skip = ui
                                    .add_sized([btn_w, 36.0], Button::new("⏭ Skip"));
                                if submit.clicked() {
                                    app.submit_answer();
                                }
                                if skip.clicked() {
                                    app.skip_question();
                                }
                            });
                        }
                        SessionPhase::Locked => {
                            verdict_block(ui, &vm);
                            ui.add_space(8.0);
                            if ui
                                .add_sized([panel_width / 2.0, 36.0], Button::new(next_label))
                                .clicked()
                            {
                                app.next_question();
                            }
                        }
                        SessionPhase::Skipped => {
                            ui.label(
                                RichText::new("⏭ Question skipped.").color(Color32::YELLOW),
                            );
                            ui.add_space(8.0);
                            ui.horizontal(|ui| {
                                ui.add_space((ui.available_width() - panel_width).max(0.0) / 2.0);
                                let btn_w = (panel_width - 8.0) / 2.0;
                                let undo = ui
                                    .add_sized([btn_w, 36.0], Button::new("↩ Undo Skip"));
                                let next = ui.add_sized([btn_w, 36.0], Button::new(next_label));
                                if undo.clicked() {
                                    app.undo_skip();
                                }
                                if next.clicked() {
                                    app.next_question();
                                }
                            });
                        }
                        SessionPhase::Finished => {}
                    }

                    ui.add_space(14.0);
                    ui.separator();
                    ui.horizontal(|ui| {
                        if ui.button("⏸ Pause & Exit").clicked() {
                            app.back_to_dashboard();
                        }
                        if vm.mode == QuizMode::All && ui.button("🏁 Quit & Evaluate").clicked() {
                            app.confirm_quit = true;
                        }
                    });
                });
        });
    });

    if app.confirm_quit {
        confirm_quit_dialog(app, ctx);
    }
}

fn options_block(app: &mut PrepApp, ui: &mut egui::Ui, vm: &QuizVm, counting: bool, width: f32) {
    for (i, option) in vm.question.options.iter().enumerate() {
        let letter = (b'A' + i as u8) as char;
        let text = format!("{letter}.  {option}");

        if counting {
            let response = ui.add_sized(
                [width, 30.0],
                egui::SelectableLabel::new(vm.selected == Some(i), text),
            );
            if response.clicked() {
                app.select_option(i);
            }
        } else {
            // Locked reveals the answer; a skipped question stays dim.
            let rich = if vm.phase == SessionPhase::Locked && i == vm.question.correct_option {
                RichText::new(format!("{text}  ✔")).color(Color32::from_rgb(87, 195, 110))
            } else if vm.phase == SessionPhase::Locked
                && vm.selected == Some(i)
                && vm.is_correct == Some(false)
            {
                RichText::new(format!("{text}  ✘")).color(Color32::from_rgb(229, 106, 106))
            } else {
                RichText::new(text).weak()
            };
            ui.label(rich);
        }
        ui.add_space(3.0);
    }
}

fn verdict_block(ui: &mut egui::Ui, vm: &QuizVm) {
    match vm.is_correct {
        Some(true) => {
            ui.label(
                RichText::new("✅ Correct!")
                    .color(Color32::from_rgb(87, 195, 110))
                    .strong(),
            );
        }
        _ => {
            let letter = (b'A' + vm.question.correct_option as u8) as char;
            ui.label(
                RichText::new(format!("❌ Incorrect. The answer is {letter}."))
                    .color(Color32::from_rgb(229, 106, 106))
                    .strong(),
            );
        }
    }
    if let Some(explanation) = &vm.question.explanation {
        ui.add_space(4.0);
        ui.label(RichText::new(explanation).italics().weak());
    }
}

fn timer_text(remaining: u32, counting: bool) -> RichText {
    let text = RichText::new(format!("⏱ {}:{:02}", remaining / 60, remaining % 60)).strong();
    if counting && remaining <= 5 {
        text.color(Color32::from_rgb(229, 106, 106))
    } else if !counting {
        text.weak()
    } else {
        text
    }
}

fn confirm_quit_dialog(app: &mut PrepApp, ctx: &Context) {
    egui::Window::new("Finish now?")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Evaluate over the answers recorded so far? Remaining questions stay unanswered.");
            ui.horizontal(|ui| {
                if ui.button("Yes, evaluate").clicked() {
                    app.quit_and_evaluate();
                }
                if ui.button("Cancel").clicked() {
                    app.confirm_quit = false;
                }
            });
        });
}
