use serde::{Deserialize, Serialize};

use super::{Message, common_types::null_as_default};

/// Response structure for the DeepSeek chat completions endpoint.
///
/// Every field is optional on the wire: a body that only carries an `error`
/// object still decodes, with the remaining fields left empty.
///
/// # Fields
/// * `id` - Unique identifier for this completion
/// * `object` - The type of object (e.g., "chat.completion")
/// * `created` - Unix timestamp of when this completion was created
/// * `model` - The model that generated the response
/// * `choices` - Generated candidates, in index order
/// * `usage` - Token usage statistics
/// * `error` - API-level error reported inside a successful HTTP response
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChatResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Represents a single choice from the chat completion.
///
/// # Fields
/// * `index` - Zero-based position of this choice in the list of responses
/// * `message` - The generated message
/// * `finish_reason` - Why the model stopped generating (e.g., "stop", "length")
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: Message,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finish_reason: String,
}

/// Token usage statistics for a completion.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Error payload the API embeds in an otherwise successful response.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ApiError {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub error_type: String,
}

impl ChatResponse {
    /// Gets the first choice from the response.
    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }

    /// Gets the content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.first_choice()
            .map(|choice| choice.message.content.as_str())
    }

    /// The embedded error, if the API reported one.
    ///
    /// An error object with an empty message does not count.
    pub fn api_error(&self) -> Option<&ApiError> {
        self.error
            .as_ref()
            .filter(|error| !error.message.is_empty())
    }
}

impl Choice {
    /// Checks if generation stopped because it hit the token limit.
    pub fn was_truncated(&self) -> bool {
        self.finish_reason == "length"
    }
}
