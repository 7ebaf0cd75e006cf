pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;

// Re-export commonly used types
pub use client::DeepSeekClient;
pub use config::Config;
pub use endpoints::chat::{
    ApiError, ChatRequest, ChatRequestBuilder, ChatResponse, Choice, CompletionPayload, Message,
    Role, Usage,
};
pub use error::DeepSeekError;
pub use transport::{HttpReply, HttpTransport, OutgoingRequest, Transport, TransportError};
