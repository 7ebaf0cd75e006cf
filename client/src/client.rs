use std::time::Duration;

use log::{debug, error, warn};
use reqwest::{
    Url,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};

use crate::{
    config::Config,
    endpoints::{
        CHAT_COMPLETIONS_PATH,
        chat::{ChatRequest, ChatResponse, CompletionPayload},
    },
    error::DeepSeekError,
    transport::{HttpReply, HttpTransport, OutgoingRequest, Transport},
};

/// Delay before the retry that follows the failed attempt `attempt` (zero-based).
///
/// Grows linearly: 1s, 2s, 3s, ... with no upper bound.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt) + 1)
}

/// A client for the DeepSeek chat completions API
///
/// Holds only immutable configuration and a transport handle, so a single
/// instance can be cloned or shared freely between tasks. Create one with
/// [`DeepSeekClient::new`], or with [`DeepSeekClient::with_transport`] to
/// supply a different HTTP stack.
#[derive(Clone, Debug)]
pub struct DeepSeekClient<T = HttpTransport> {
    transport: T,
    url: String,
    headers: HeaderMap,
    max_retries: u32,
}

impl DeepSeekClient<HttpTransport> {
    /// Creates a client backed by a `reqwest` transport.
    ///
    /// Unset base URL and timeout are filled with their defaults. No request
    /// is made until [`chat`](Self::chat) is called.
    ///
    /// # Errors
    ///
    /// Returns [`DeepSeekError::Config`] for an empty or malformed API key or
    /// an unparseable base URL, and
    /// [`DeepSeekError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, DeepSeekError> {
        let transport =
            HttpTransport::new(config.effective_timeout()).map_err(DeepSeekError::HttpClient)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> DeepSeekClient<T> {
    /// Creates a client that sends its requests through `transport`.
    ///
    /// The timeout in `config` is not applied here; it is the transport's
    /// responsibility. Fails with [`DeepSeekError::Config`] when the API key is
    /// empty or not a valid header value, or when the base URL does not parse.
    pub fn with_transport(config: Config, transport: T) -> Result<Self, DeepSeekError> {
        if config.api_key.trim().is_empty() {
            return Err(DeepSeekError::Config("API key must not be empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|_| {
            DeepSeekError::Config("API key contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let url = format!("{}{}", config.effective_base_url(), CHAT_COMPLETIONS_PATH);
        Url::parse(&url)
            .map_err(|err| DeepSeekError::Config(format!("invalid base URL {url:?}: {err}")))?;
        debug!("Created DeepSeek client for {url} (max retries: {})", config.max_retries);

        Ok(Self {
            transport,
            url,
            headers,
            max_retries: config.max_retries,
        })
    }

    /// The full URL chat requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Sends a chat completion request and returns the decoded response.
    ///
    /// Unset sampling fields are filled with their defaults first. Transport
    /// failures are retried up to `max_retries` times with a linear backoff;
    /// any HTTP status ends the retry loop.
    ///
    /// # Errors
    ///
    /// * [`DeepSeekError::Serialize`] if the request cannot be encoded
    /// * [`DeepSeekError::MaxRetriesExceeded`] if every attempt failed to reach the server
    /// * [`DeepSeekError::Transport`] if the response body could not be read
    /// * [`DeepSeekError::Status`] if the status is not 200
    /// * [`DeepSeekError::Deserialize`] if the body is not a chat completion
    /// * [`DeepSeekError::Api`] if the body carries an error message
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, DeepSeekError> {
        let payload = CompletionPayload::from(request);
        let body = serde_json::to_vec(&payload).map_err(DeepSeekError::Serialize)?;
        debug!(
            "Sending chat request: model={}, messages={}, web_search={}",
            payload.model,
            payload.messages.len(),
            payload.web_search
        );

        let outgoing = OutgoingRequest {
            url: self.url.clone(),
            headers: self.headers.clone(),
            body,
        };
        let reply = self.send_with_retry(&outgoing).await?;

        if !reply.is_ok() {
            error!("API request failed with status {}: {}", reply.status, reply.body);
            return Err(DeepSeekError::Status {
                status: reply.status,
                body: reply.body,
            });
        }

        let response: ChatResponse =
            serde_json::from_str(&reply.body).map_err(DeepSeekError::Deserialize)?;

        if let Some(api_error) = response.api_error() {
            error!("API error: {} (type: {})", api_error.message, api_error.error_type);
            return Err(DeepSeekError::Api {
                message: api_error.message.clone(),
                error_type: api_error.error_type.clone(),
            });
        }

        debug!(
            "Received response {}: choices={}, tokens={}",
            response.id,
            response.choices.len(),
            response.usage.total_tokens
        );
        Ok(response)
    }

    /// Asks a single question framed by a system prompt and returns the answer text.
    pub async fn quick_chat(
        &self,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Result<String, DeepSeekError> {
        self.first_content(ChatRequest::system_user(system_prompt, user_message))
            .await
    }

    /// Same as [`quick_chat`](Self::quick_chat) with web search enabled.
    pub async fn quick_chat_web_search(
        &self,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Result<String, DeepSeekError> {
        let mut request = ChatRequest::system_user(system_prompt, user_message);
        request.web_search = true;
        self.first_content(request).await
    }

    async fn first_content(&self, request: ChatRequest) -> Result<String, DeepSeekError> {
        self.chat(request)
            .await?
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(DeepSeekError::NoChoices)
    }

    async fn send_with_retry(&self, request: &OutgoingRequest) -> Result<HttpReply, DeepSeekError> {
        let total_attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;
        loop {
            debug!("POST {} (attempt {}/{total_attempts})", request.url, attempt + 1);
            match self.transport.post(request).await {
                Ok(reply) => return Ok(reply),
                Err(err) if !err.is_retryable() => return Err(DeepSeekError::Transport(err)),
                Err(err) if attempt >= self.max_retries => {
                    warn!("Attempt {}/{total_attempts} failed: {err}; giving up", attempt + 1);
                    return Err(DeepSeekError::MaxRetriesExceeded {
                        attempts: total_attempts,
                        source: err,
                    });
                }
                Err(err) => {
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Attempt {}/{total_attempts} failed: {err}; retrying in {}s",
                        attempt + 1,
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
