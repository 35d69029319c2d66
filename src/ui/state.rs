use crate::common::{ChatMessage, ConnectionStatus, ServerInfo, SessionEvent};

/// Trạng thái cục bộ của UI — bản phản chiếu chỉ-đọc của state trong
/// session task, cập nhật duy nhất qua [`SessionEvent`].
pub struct AppState {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub status: ConnectionStatus,
    pub loading: bool,
    /// Server details đã format sẵn để hiển thị trong panel gập.
    pub server_info: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input_text: String::new(),
            status: ConnectionStatus::Checking,
            loading: false,
            server_info: None,
        }
    }

    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StatusChanged(status) => self.status = status,
            SessionEvent::ServerInfoLoaded(info) => {
                self.server_info = Some(format_server_info(&info));
            }
            SessionEvent::MessageAppended(message) => self.messages.push(message),
            SessionEvent::LoadingChanged(loading) => self.loading = loading,
        }
    }
}

fn format_server_info(info: &ServerInfo) -> String {
    let value = serde_json::json!({ "health": info.health, "auth": info.auth });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::common::Role;

    #[test]
    fn events_update_the_mirror() {
        let mut state = AppState::new();
        assert_eq!(state.status, ConnectionStatus::Checking);

        state.apply_event(SessionEvent::StatusChanged(ConnectionStatus::Connected));
        assert_eq!(state.status, ConnectionStatus::Connected);

        state.apply_event(SessionEvent::LoadingChanged(true));
        assert!(state.loading);

        state.apply_event(SessionEvent::MessageAppended(ChatMessage {
            id: "1".to_string(),
            role: Role::User,
            text: "hello".to_string(),
            created_at: Utc::now(),
        }));
        assert_eq!(state.messages.len(), 1);

        state.apply_event(SessionEvent::ServerInfoLoaded(ServerInfo {
            health: json!({"status": "ok"}),
            auth: json!({"authenticated": false}),
        }));
        let details = state.server_info.expect("details rendered");
        assert!(details.contains("\"health\""));
        assert!(details.contains("\"auth\""));
    }
}
