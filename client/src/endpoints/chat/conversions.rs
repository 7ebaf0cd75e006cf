use serde::Serialize;

use super::{ChatRequest, Message};

/// Model used when a request does not name one
pub const DEFAULT_MODEL: &str = "deepseek-chat";
/// Token limit used when a request does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Sampling temperature used when a request does not set one
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
/// Top-p used when a request does not set one
pub const DEFAULT_TOP_P: f64 = 1.0;

/// The body actually posted to `/chat/completions`.
///
/// Produced from a [`ChatRequest`] by filling every unset sampling field with
/// its default, so each field here is always present on the wire except `stop`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompletionPayload {
    pub messages: Vec<Message>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub web_search: bool,
}

impl From<ChatRequest> for CompletionPayload {
    fn from(request: ChatRequest) -> Self {
        let ChatRequest {
            messages,
            model,
            max_tokens,
            temperature,
            top_p,
            frequency_penalty,
            presence_penalty,
            stop,
            web_search,
        } = request;

        CompletionPayload {
            messages,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: top_p.unwrap_or(DEFAULT_TOP_P),
            frequency_penalty: frequency_penalty.unwrap_or_default(),
            presence_penalty: presence_penalty.unwrap_or_default(),
            stop,
            web_search,
        }
    }
}
