pub mod client;
pub mod credentials;

pub use client::{ChatBackend, ChatReply, ClientError, FunctionClient};
