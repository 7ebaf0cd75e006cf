use serde::{Deserialize, Serialize};

/// The author of a message in a conversation.
///
/// Decoding is lenient: a missing, `null` or unrecognised role in a response
/// becomes [`Role::Assistant`], since only the model writes response messages.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation
    System,
    /// Input from the end user
    User,
    /// Output produced by the model
    #[default]
    Assistant,
    /// Result of a tool invocation
    Tool,
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "tool" => Role::Tool,
            _ => Role::Assistant,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let role = Option::<String>::deserialize(deserializer)?;
        Ok(role.as_deref().map(Role::from).unwrap_or_default())
    }
}

/// A single message in a chat conversation.
///
/// The order of messages in a request is the order of the conversation.
///
/// # Fields
/// * `role` - Who wrote the message
/// * `content` - The message text
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Who wrote the message
    #[serde(default)]
    pub role: Role,
    /// The message text
    #[serde(default, deserialize_with = "super::common_types::null_as_default")]
    pub content: String,
}

impl Message {
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a message with role "system"
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a message with role "user"
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a message with role "assistant"
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A chat completion request as the caller describes it.
///
/// Every sampling field is optional. Fields left as `None` are filled with the
/// client defaults right before the request is sent; a field that is set,
/// even to zero, is sent as is. See [`CompletionPayload`](super::CompletionPayload)
/// for the resolved form.
///
/// # Fields
/// * `messages` - The conversation, oldest message first
/// * `model` - Model identifier, defaults to `deepseek-chat`
/// * `max_tokens` - Upper bound on generated tokens, defaults to 2048
/// * `temperature` - Sampling temperature, defaults to 1
/// * `top_p` - Nucleus sampling mass, defaults to 1
/// * `frequency_penalty` / `presence_penalty` - Repetition penalties, default to 0
/// * `stop` - Sequences that end generation
/// * `web_search` - Whether the model may search the web
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub stop: Option<Vec<String>>,
    pub web_search: bool,
}

impl ChatRequest {
    /// Creates a new ChatRequest builder.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Creates the two-message request used by the quick chat helpers.
    pub fn system_user<S: Into<String>, U: Into<String>>(system: S, user: U) -> Self {
        Self {
            messages: vec![Message::system(system), Message::user(user)],
            ..Self::default()
        }
    }
}

/// Builder for constructing ChatRequest instances.
///
/// Provides a fluent interface; anything not set stays unset and picks up the
/// client default.
#[derive(Debug, Clone, Default)]
pub struct ChatRequestBuilder {
    request: ChatRequest,
}

impl ChatRequestBuilder {
    /// Sets the model for the chat request.
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.request.model = Some(model.into());
        self
    }

    /// Appends a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.request.messages.push(message);
        self
    }

    /// Appends several messages to the conversation, in order.
    pub fn messages<I: IntoIterator<Item = Message>>(mut self, messages: I) -> Self {
        self.request.messages.extend(messages);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.request.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.request.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.request.top_p = Some(top_p);
        self
    }

    pub fn frequency_penalty(mut self, penalty: f64) -> Self {
        self.request.frequency_penalty = Some(penalty);
        self
    }

    pub fn presence_penalty(mut self, penalty: f64) -> Self {
        self.request.presence_penalty = Some(penalty);
        self
    }

    /// Adds a stop sequence.
    pub fn stop<S: Into<String>>(mut self, sequence: S) -> Self {
        self.request
            .stop
            .get_or_insert_with(Vec::new)
            .push(sequence.into());
        self
    }

    /// Enables or disables web search for this request.
    pub fn web_search(mut self, enabled: bool) -> Self {
        self.request.web_search = enabled;
        self
    }

    pub fn build(self) -> ChatRequest {
        self.request
    }
}
