use super::types::{ChatMessage, ConnectionStatus, ServerInfo};

/// Sự kiện từ tầng session gửi lên UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StatusChanged(ConnectionStatus),
    ServerInfoLoaded(ServerInfo),
    MessageAppended(ChatMessage),
    LoadingChanged(bool),
}
