use eframe::egui;

use crate::common::ChatMessage;

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], loading: bool) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if messages.is_empty() {
                render_help(ui);
            }

            for message in messages {
                ui.push_id(&message.id, |ui| {
                    ui.label(egui::RichText::new(message.role.label()).strong());
                    ui.label(&message.text);
                    ui.label(
                        egui::RichText::new(message.created_at.format("%H:%M:%S").to_string())
                            .weak(),
                    );
                    ui.add_space(8.0);
                });
            }

            if loading {
                ui.label(egui::RichText::new("Assistant is thinking...").italics());
            }
        });
}

fn render_help(ui: &mut egui::Ui) {
    ui.label("MCP Chat with Azure Functions");
    ui.label("Try asking:");
    ui.label("  • \"What time is it?\"");
    ui.label("  • \"What's the weather like today?\"");
    ui.label(egui::RichText::new("Mock responses are returned during local development").weak());
    ui.add_space(8.0);
}
