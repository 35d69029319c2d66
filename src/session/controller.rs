use tokio::sync::mpsc;
use uuid::Uuid;

use crate::common::{
    ChatMessage, Clock, ConnectionStatus, Role, ServerInfo, SessionCommand, SessionEvent,
};
use crate::network::ChatBackend;

/// Câu trả lời thay thế khi backend trả về nội dung rỗng.
pub const FALLBACK_REPLY: &str = "Sorry, I could not process your request.";
/// Thông báo lỗi ghi vào transcript khi gửi tin thất bại.
pub const ERROR_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// State machine của một phiên chat. Chạy trong task riêng, nhận lệnh từ UI
/// qua channel và phản chiếu mọi chuyển trạng thái lên UI dưới dạng event.
pub struct SessionController<B: ChatBackend> {
    backend: B,
    clock: Box<dyn Clock>,
    event_sender: mpsc::Sender<SessionEvent>,
    command_receiver: mpsc::Receiver<SessionCommand>,
    status: ConnectionStatus,
    messages: Vec<ChatMessage>,
    loading: bool,
    server_info: Option<ServerInfo>,
}

impl<B: ChatBackend> SessionController<B> {
    pub fn new(
        backend: B,
        clock: Box<dyn Clock>,
        event_sender: mpsc::Sender<SessionEvent>,
        command_receiver: mpsc::Receiver<SessionCommand>,
    ) -> Self {
        Self {
            backend,
            clock,
            event_sender,
            command_receiver,
            status: ConnectionStatus::Checking,
            messages: Vec::new(),
            loading: false,
            server_info: None,
        }
    }

    pub async fn run(mut self) {
        self.initialize().await;

        while let Some(command) = self.command_receiver.recv().await {
            match command {
                SessionCommand::Submit(text) => self.send_turn(&text).await,
            }
        }

        log::info!("Session command channel closed, shutting down");
    }

    /// Probe backend một lần lúc mở phiên: health check xong mới tới auth
    /// probe (tuần tự, để thứ tự server info luôn cố định).
    pub async fn initialize(&mut self) {
        if self.status != ConnectionStatus::Checking {
            return;
        }

        let info = match self.backend.health_check().await {
            Ok(health) => match self.backend.test_authentication().await {
                Ok(auth) => Some(ServerInfo { health, auth }),
                Err(err) => {
                    log::error!("Connection check failed: {err}");
                    None
                }
            },
            Err(err) => {
                log::error!("Connection check failed: {err}");
                None
            }
        };

        match info {
            Some(info) => {
                self.server_info = Some(info.clone());
                self.emit(SessionEvent::ServerInfoLoaded(info)).await;
                self.set_status(ConnectionStatus::Connected).await;
            }
            None => self.set_status(ConnectionStatus::Error).await,
        }
    }

    /// Một lượt chat: append tin người dùng ngay, gọi backend, rồi append
    /// câu trả lời (hoặc thông báo lỗi). `loading` luôn được hạ ở cuối.
    pub async fn send_turn(&mut self, input: &str) {
        let text = input.trim();
        // Chặn tin rỗng và chặn gửi chồng khi lượt trước chưa xong
        if text.is_empty() || self.loading {
            return;
        }

        self.set_loading(true).await;
        self.append_message(Role::User, text.to_string()).await;

        match self.backend.send_chat_message(text).await {
            Ok(reply) => {
                let content = reply
                    .content
                    .filter(|content| !content.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_REPLY.to_string());
                self.append_message(Role::Assistant, content).await;
            }
            Err(err) => {
                log::error!("Error sending message: {err}");
                self.append_message(Role::Assistant, ERROR_REPLY.to_string())
                    .await;
            }
        }

        self.set_loading(false).await;
    }

    async fn append_message(&mut self, role: Role, text: String) {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            text,
            created_at: self.clock.now(),
        };
        self.messages.push(message.clone());
        self.emit(SessionEvent::MessageAppended(message)).await;
    }

    async fn set_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.emit(SessionEvent::StatusChanged(status)).await;
    }

    async fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.emit(SessionEvent::LoadingChanged(loading)).await;
    }

    async fn emit(&self, event: SessionEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to notify UI: {err}");
        }
    }
}
