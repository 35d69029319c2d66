use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{SessionCommand, SessionEvent};

use super::components::{chat_area, input_bar, status_banner};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<SessionCommand>,
    event_receiver: mpsc::Receiver<SessionEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<SessionCommand>,
        event_receiver: mpsc::Receiver<SessionEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_session_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn submit_message(&mut self, text: String) {
        if let Err(err) = self.command_sender.try_send(SessionCommand::Submit(text)) {
            log::warn!("Failed to send command to session: {err}");
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_session_events();

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(text) = input_bar::render(ui, &mut self.state.input_text, self.state.loading)
            {
                self.submit_message(text);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("MCP Function Chat");
            ui.separator();
            status_banner::render(ui, &self.state);
            ui.separator();
            chat_area::render(ui, &self.state.messages, self.state.loading);
        });

        ctx.request_repaint();
    }
}
