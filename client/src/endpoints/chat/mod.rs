pub mod chat_request;
pub mod chat_response;
pub mod common_types;
pub mod conversions;

pub use chat_request::*;
pub use chat_response::*;
pub use conversions::*;
