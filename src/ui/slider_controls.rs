use egui::{Color32, DragValue, Grid, Response, RichText, ScrollArea, Ui};

use crate::{
    model::{Helper, Model},
    preset::slider::{SliderType, FALLBACK_CC, MIDI_MAX},
};

enum SliderAction {
    MoveUp(usize),
    MoveDown(usize),
    Add(usize),
    Remove(usize),
    ClearCc(usize),
}

fn track(response: &Response, helper: Helper, pending: &mut Option<Helper>) {
    if response.has_focus() || response.hovered() {
        *pending = Some(helper);
    }
}

pub fn render_slider_controls(model: &mut Model, ui: &mut Ui) {
    ui.heading("Sliders");
    ui.separator();

    // List changes are applied after drawing so indices stay stable
    let mut action: Option<SliderAction> = None;
    let mut pending = model.pending_helper;
    let count = model.form.len();
    let errors = model.form.errors();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, slider) in model.form.plugin_mut().sliders.iter_mut().enumerate() {
                let index = i + 1;
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(format!("#{}", index)).strong());
                        let name = ui.add(
                            egui::TextEdit::singleline(&mut slider.name)
                                .hint_text(format!("Slider{}", index))
                                .desired_width(200.),
                        );
                        track(&name, Helper::Name, &mut pending);

                        let kind = egui::ComboBox::from_id_source(format!("slider_type_{}", i))
                            .selected_text(slider.slider_type.label())
                            .show_ui(ui, |ui| {
                                for t in [SliderType::Range, SliderType::Toggle] {
                                    ui.selectable_value(&mut slider.slider_type, t, t.label());
                                }
                            });
                        track(&kind.response, Helper::Type, &mut pending);

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .add_enabled(count > 1, egui::Button::new("➖"))
                                .on_hover_text("Remove slider")
                                .clicked()
                            {
                                action = Some(SliderAction::Remove(i));
                            }
                            if ui.button("➕").on_hover_text("Add slider").clicked() {
                                action = Some(SliderAction::Add(i));
                            }
                            if ui
                                .add_enabled(i + 1 < count, egui::Button::new("⏷"))
                                .on_hover_text("Move down")
                                .clicked()
                            {
                                action = Some(SliderAction::MoveDown(i));
                            }
                            if ui
                                .add_enabled(i > 0, egui::Button::new("⏶"))
                                .on_hover_text("Move up")
                                .clicked()
                            {
                                action = Some(SliderAction::MoveUp(i));
                            }
                        });
                    });

                    Grid::new(format!("slider_values_{}", i))
                        .num_columns(8)
                        .show(ui, |ui| {
                            ui.label("CC");
                            ui.horizontal(|ui| {
                                let mut cc = slider.effective_cc();
                                let cc_response =
                                    ui.add(DragValue::new(&mut cc).clamp_range(0..=MIDI_MAX));
                                if cc_response.changed() {
                                    slider.cc = Some(cc);
                                }
                                track(&cc_response, Helper::Cc, &mut pending);

                                if slider.cc.is_some() {
                                    if ui
                                        .small_button("✖")
                                        .on_hover_text(format!("Use default CC ({})", FALLBACK_CC))
                                        .clicked()
                                    {
                                        action = Some(SliderAction::ClearCc(i));
                                    }
                                } else {
                                    ui.weak("(auto)");
                                }
                            });

                            ui.label("Default");
                            let default_max = match slider.slider_type {
                                SliderType::Range => MIDI_MAX,
                                SliderType::Toggle => 1,
                            };
                            let default_value = ui.add(
                                DragValue::new(&mut slider.default_value)
                                    .clamp_range(0..=default_max),
                            );
                            track(&default_value, Helper::DefaultValue, &mut pending);

                            ui.add_enabled_ui(slider.slider_type == SliderType::Range, |ui| {
                                ui.label("Min");
                                let min_value = ui.add(
                                    DragValue::new(&mut slider.min_value)
                                        .clamp_range(0..=MIDI_MAX),
                                );
                                track(&min_value, Helper::MinValue, &mut pending);

                                ui.label("Max");
                                let max_value = ui.add(
                                    DragValue::new(&mut slider.max_value)
                                        .clamp_range(0..=MIDI_MAX),
                                );
                                track(&max_value, Helper::MaxValue, &mut pending);
                            });
                            ui.end_row();
                        });

                    for e in errors.iter().filter(|e| e.slider() == Some(index)) {
                        ui.label(RichText::new(e.to_string()).color(Color32::LIGHT_RED).small());
                    }
                });
            }
        });

    model.pending_helper = pending;

    match action {
        Some(SliderAction::MoveUp(i)) => model.form.move_up(i),
        Some(SliderAction::MoveDown(i)) => model.form.move_down(i),
        Some(SliderAction::Add(i)) => model.form.add_slider_after(i),
        Some(SliderAction::Remove(i)) => model.form.remove_slider(i),
        Some(SliderAction::ClearCc(i)) => model.form.clear_cc(i),
        None => (),
    }
}
