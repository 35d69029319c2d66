use chrono::{DateTime, Utc};
use serde_json::Value;

/// Vai trò của một tin nhắn trong hội thoại.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Trạng thái kết nối backend, chốt đúng một lần sau khi khởi tạo phiên.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Checking,
    Connected,
    Error,
}

/// Kết quả probe backend khi khởi tạo phiên thành công.
/// Payload giữ nguyên dạng JSON, UI chỉ hiển thị chứ không diễn giải.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub health: Value,
    pub auth: Value,
}
