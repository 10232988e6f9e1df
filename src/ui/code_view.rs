use egui::{Color32, RichText, ScrollArea, Sense, Ui};

use crate::model::Model;

pub fn render_code_view(model: &mut Model, ui: &mut Ui) {
    let generated = model.generated_code();

    ui.horizontal(|ui| {
        ui.heading("Click the code block to copy");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(generated.is_ok(), egui::Button::new("💾 Save plugin..."))
                .on_hover_text("Download plugin")
                .clicked()
            {
                model.save_plugin_dialog();
            }
        });
    });

    ui.separator();

    match generated {
        Ok(code) => {
            ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let block = ui
                        .add(egui::Label::new(RichText::new(&code).monospace()).sense(Sense::click()))
                        .on_hover_text("Copy to clipboard");
                    if block.clicked() {
                        model.copy_plugin(ui.ctx());
                    }
                });
        }
        Err(e) => {
            ui.label(RichText::new("Fix the form to generate the plugin:").color(Color32::YELLOW));
            for problem in e.validation_errors() {
                ui.label(RichText::new(problem.to_string()).color(Color32::LIGHT_RED));
            }
        }
    }
}
