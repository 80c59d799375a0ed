use egui::{Button, Context};

use crate::PrepApp;
use crate::app::TIME_OPTIONS;
use crate::ui::layout::centered_panel;

pub fn ui_time_select(app: &mut PrepApp, ctx: &Context) {
    let Some(topic_name) = app.current_topic().map(|t| t.name.clone()) else {
        app.back_to_dashboard();
        return;
    };
    let mode_label = app.mode.label();

    centered_panel(ctx, 320.0, 420.0, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading("Time per question");
            ui.add_space(6.0);
            ui.label(format!("{topic_name} — {mode_label}"));
            ui.add_space(16.0);

            let btn_w = ui.available_width() * 0.8;
            let mut picked = None;
            for seconds in TIME_OPTIONS {
                if ui
                    .add_sized([btn_w, 36.0], Button::new(time_label(seconds)))
                    .clicked()
                {
                    picked = Some(seconds);
                }
                ui.add_space(5.0);
            }
            if let Some(seconds) = picked {
                app.time_selected(seconds);
            }

            ui.add_space(12.0);
            if ui
                .add_sized([btn_w, 36.0], Button::new("🔙 Back"))
                .clicked()
            {
                app.back_to_dashboard();
            }
        });
    });
}

fn time_label(seconds: u32) -> String {
    if seconds >= 60 {
        format!("{} min", seconds / 60)
    } else {
        format!("{seconds} s")
    }
}
