use eframe::egui;

pub fn render(ui: &mut egui::Ui, input_text: &mut String, loading: bool) -> Option<String> {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            !loading,
            egui::TextEdit::singleline(input_text)
                .hint_text("Type your message here... (Press Enter to send)"),
        );

        let label = if loading { "Sending..." } else { "Send" };
        if ui
            .add_enabled(
                !loading && !input_text.trim().is_empty(),
                egui::Button::new(label),
            )
            .clicked()
        {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
    });

    if send && !loading && !input_text.trim().is_empty() {
        let message = input_text.trim().to_string();
        input_text.clear();
        return Some(message);
    }

    None
}
