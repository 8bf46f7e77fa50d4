pub mod interface;
pub mod client;

pub use interface::{ApiResponse, MessageSender, SendMessageRequest};
pub use client::TelegramSender;
