use eframe::egui;

use crate::common::ConnectionStatus;
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Backend Status:").strong());
        match state.status {
            ConnectionStatus::Checking => {
                ui.colored_label(egui::Color32::YELLOW, "Checking connection...");
            }
            ConnectionStatus::Connected => {
                ui.colored_label(egui::Color32::GREEN, "● Connected");
            }
            ConnectionStatus::Error => {
                ui.colored_label(egui::Color32::RED, "● Connection Error (using mock mode)");
            }
        }
    });

    if let Some(details) = &state.server_info {
        egui::CollapsingHeader::new("Server Details").show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(150.0)
                .show(ui, |ui| {
                    ui.monospace(details);
                });
        });
    }
}
