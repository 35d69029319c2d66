/// Lệnh UI gửi xuống tầng session.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Người dùng bấm gửi một tin nhắn.
    Submit(String),
}
