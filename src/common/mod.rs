pub mod clock;
pub mod commands;
pub mod events;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use commands::SessionCommand;
pub use events::SessionEvent;
pub use types::{ChatMessage, ConnectionStatus, Role, ServerInfo};
