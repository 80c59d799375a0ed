use super::*;
use crate::engine::stats::StatsBook;

impl PrepApp {
    /// Wipes every persisted record: stats, sessions, selections, app
    /// state and mock scores.
    pub fn reset_all_progress(&mut self) {
        self.store.clear_all();
        self.stats = StatsBook::default();
        self.session = None;
        self.last_results = None;
        self.selected_topic = None;
        self.time_per_question = None;
        self.mode = QuizMode::Topic;
        self.mock_scores.clear();
        self.mock_input_error = None;
        self.confirm_reset = false;
        self.message = "All progress has been reset.".to_owned();
        log::info!("all persisted progress cleared");
    }

    pub fn confirm_reset_dialog(&mut self, ctx: &egui::Context) {
        egui::Window::new("Reset all progress?")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    "This removes saved quiz sessions, selections and statistics. \
                     You cannot undo this.",
                );
                ui.horizontal(|ui| {
                    if ui.button("Yes, reset").clicked() {
                        self.reset_all_progress();
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_reset = false;
                    }
                });
            });
    }
}
