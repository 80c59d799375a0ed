pub mod layout;
pub mod views;

use eframe::{App, Frame};
use egui::Context;

use crate::app::PrepApp;
use crate::model::AppState;
use layout::{bottom_panel, top_panel};

impl App for PrepApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        // Logical one-second ticks are derived from the egui clock
        // before anything is drawn.
        self.pump_timer(ctx.input(|i| i.time));

        // The quiz screen manages its own exits; everywhere else gets
        // the navigation bar.
        if self.state != AppState::Quiz {
            top_panel(self, ctx);
        }
        bottom_panel(ctx);

        match self.state {
            AppState::Dashboard => views::dashboard::ui_dashboard(self, ctx),
            AppState::TimeSelect => views::time_select::ui_time_select(self, ctx),
            AppState::Quiz => views::quiz::ui_quiz(self, ctx),
            AppState::Results => views::results::ui_results(self, ctx),
            AppState::Review => views::review::ui_review(self, ctx),
            AppState::Materials => views::materials::ui_materials(self, ctx),
            AppState::Settings => views::settings::ui_settings(self, ctx),
        }

        if self.confirm_reset {
            self.confirm_reset_dialog(ctx);
        }

        // Keep frames coming while a countdown is live; otherwise egui
        // only repaints on input and the timer would stall.
        let counting = self.state == AppState::Quiz
            && self
                .session
                .as_ref()
                .map(|s| s.counting_down())
                .unwrap_or(false);
        if counting {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.store.flush_into(storage);
    }
}
