use thiserror::Error;

use crate::transport::TransportError;

/// A custom error type for the DeepSeek API client.
#[derive(Error, Debug)]
pub enum DeepSeekError {
    /// The client configuration was rejected at construction time.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The underlying HTTP client could not be built.
    #[error("error building HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The request body could not be encoded as JSON.
    #[error("error marshaling request: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The response body was not a valid chat completion.
    #[error("error unmarshaling response: {0}")]
    Deserialize(#[source] serde_json::Error),
    /// Every attempt failed at the transport level.
    #[error("max retries exceeded after {attempts} attempts, last error: {source}")]
    MaxRetriesExceeded {
        attempts: u32,
        #[source]
        source: TransportError,
    },
    /// A transport failure that happened after the server answered.
    #[error(transparent)]
    Transport(TransportError),
    /// The server answered with a status other than 200.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    /// The server answered 200 but embedded an error in the body.
    #[error("API error: {message} (type: {error_type})")]
    Api { message: String, error_type: String },
    /// The response carried no choices to read content from.
    #[error("no choices in response")]
    NoChoices,
}
