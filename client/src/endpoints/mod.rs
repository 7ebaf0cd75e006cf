pub mod chat;

/// Path of the chat completions endpoint, relative to the base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
