pub mod interface;
pub mod client;

pub use interface::{TranslateRequest, Translator};
pub use client::GoogleTranslateClient;
