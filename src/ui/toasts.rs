use std::time::Instant;

use egui::{Color32, RichText};

use crate::{model::Model, notification::ToastKind};

pub fn render_toasts(model: &mut Model, ctx: &egui::Context) {
    let mut dismissed: Option<u64> = None;

    let toasts = model.notifications.active(Instant::now());
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("Toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12., -40.])
        .show(ctx, |ui| {
            for toast in toasts {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(360.);
                    ui.horizontal(|ui| {
                        let colour = match toast.kind {
                            ToastKind::Success => Color32::LIGHT_GREEN,
                            ToastKind::Info => Color32::LIGHT_BLUE,
                            ToastKind::Error => Color32::LIGHT_RED,
                        };
                        ui.label(RichText::new(&toast.title).color(colour).strong());
                        if ui.small_button("🗙").on_hover_text("Dismiss").clicked() {
                            dismissed = Some(toast.id);
                        }
                    });
                    if let Some(message) = &toast.message {
                        ui.label(message);
                    }
                });
            }
        });

    if let Some(id) = dismissed {
        model.notifications.dismiss(id);
    }
}
