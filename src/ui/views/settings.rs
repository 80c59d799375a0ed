use egui::{Button, Color32, Context, RichText};

use crate::PrepApp;
use crate::ui::layout::centered_panel;

pub fn ui_settings(app: &mut PrepApp, ctx: &Context) {
    centered_panel(ctx, 260.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Settings");
            ui.add_space(10.0);

            if !app.message.is_empty() {
                ui.label(RichText::new(&app.message).color(Color32::YELLOW));
                ui.add_space(8.0);
            }

            let btn_w = ui.available_width() * 0.8;
            ui.label("Remove every saved session, selection and statistic.");
            ui.add_space(6.0);
            if ui
                .add_sized(
                    [btn_w, 36.0],
                    Button::new("🗑 Reset all progress").fill(Color32::DARK_RED),
                )
                .clicked()
            {
                app.confirm_reset = true;
            }

            ui.add_space(16.0);
            if ui
                .add_sized([btn_w, 36.0], Button::new("🔙 Back"))
                .clicked()
            {
                app.back_to_dashboard();
            }
        });
    });
}
