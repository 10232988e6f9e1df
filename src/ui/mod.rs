use std::time::Duration;

use egui::{Color32, RichText, Vec2};

use crate::model::{Helper, Model};

use self::{
    code_view::render_code_view, slider_controls::render_slider_controls, toasts::render_toasts,
};

mod code_view;
mod slider_controls;
mod toasts;

pub const WINDOW_SIZE: Vec2 = Vec2::new(1280., 860.);

pub fn render_gui(model: &mut Model, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    // The generated date and toast lifetimes both tick without input
    ctx.request_repaint_after(Duration::from_secs(1));

    model.helper = model.pending_helper.take();

    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    if !dropped.is_empty() {
        model.handle_dropped_files(dropped);
    }

    render_plugin_info(model, ctx);

    egui::TopBottomPanel::bottom("Helpers")
        .min_height(28.)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| match model.helper {
                Some(helper) => {
                    ui.label(helper.text());
                }
                None => {
                    ui.label(
                        RichText::new("Drop a preset .json file anywhere to load it")
                            .color(Color32::GRAY)
                            .italics()
                            .small(),
                    );
                }
            });
        });

    egui::SidePanel::left("Sliders")
        .resizable(true)
        .default_width(560.)
        .show(ctx, |ui| {
            render_slider_controls(model, ui);
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        render_code_view(model, ui);
    });

    if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
        egui::Area::new(egui::Id::new("DropOverlay"))
            .anchor(egui::Align2::CENTER_CENTER, [0., 0.])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.heading("Drop to load preset");
                });
            });
    }

    if model.show_paste_dialog {
        render_paste_dialog(model, ctx);
    }

    if model.show_confirm_clear {
        egui::Window::new("Clear the form?")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("All sliders go back to the defaults.");
                ui.horizontal(|ui| {
                    if ui.button(RichText::new("Clear 🗑").heading()).clicked() {
                        model.show_confirm_clear = false;
                        model.clear();
                    }
                    if ui.button(RichText::new("Cancel 🗙").heading()).clicked() {
                        model.show_confirm_clear = false;
                    }
                });
            });
    }

    render_toasts(model, ctx);
}

fn render_plugin_info(model: &mut Model, ctx: &egui::Context) {
    egui::TopBottomPanel::top("PluginInformation")
        .min_height(32.)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎛");
                ui.label("Name");
                let name = ui.add(
                    egui::TextEdit::singleline(&mut model.form.plugin_mut().name)
                        .hint_text("Plugin name")
                        .desired_width(220.),
                );
                if name.has_focus() || name.hovered() {
                    model.pending_helper = Some(Helper::PluginName);
                }

                let channels =
                    ui.checkbox(&mut model.form.plugin_mut().use_channels, "MIDI Channel");
                if channels.hovered() {
                    model.pending_helper = Some(Helper::UseChannels);
                }

                ui.label("|");

                if ui
                    .button("⏶ Paste preset")
                    .on_hover_text("Upload preset from clipboard")
                    .clicked()
                {
                    model.show_paste_dialog = true;
                }
                if ui.button("Load preset...").clicked() {
                    model.load_preset_dialog();
                }
                if ui
                    .button("⏷ Save preset...")
                    .on_hover_text("Download preset")
                    .clicked()
                {
                    model.save_preset_dialog();
                }
                if ui.button("Copy preset").clicked() {
                    model.copy_preset(ctx);
                }
                if ui.button("🗑").on_hover_text("Clear").clicked() {
                    model.show_confirm_clear = true;
                }

                match &model.current_preset_path {
                    Some(path) => {
                        ui.label(RichText::new(path).color(Color32::WHITE).italics().small());
                    }
                    None => {
                        ui.label(
                            RichText::new("No preset file")
                                .color(Color32::GRAY)
                                .italics()
                                .small(),
                        );
                    }
                }
            });
        });
}

fn render_paste_dialog(model: &mut Model, ctx: &egui::Context) {
    let mut open = true;
    egui::Window::new("Paste preset")
        .collapsible(false)
        .resizable(true)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label("Paste the preset JSON below. A *.jsfx plugin can not be uploaded.");
            egui::ScrollArea::vertical()
                .max_height(320.)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut model.paste_buffer)
                            .code_editor()
                            .desired_rows(12)
                            .desired_width(f32::INFINITY),
                    );
                });
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        !model.paste_buffer.trim().is_empty(),
                        egui::Button::new("Upload"),
                    )
                    .clicked()
                {
                    model.submit_paste_dialog();
                }
                if ui.button("Cancel").clicked() {
                    model.show_paste_dialog = false;
                }
            });
        });
    if !open {
        model.show_paste_dialog = false;
    }
}
