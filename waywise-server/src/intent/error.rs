//! Intent extraction error types.

use std::fmt;

/// Errors from turning free text into a travel query.
#[derive(Debug)]
pub enum IntentError {
    /// The client could not be built from its configuration
    Config(String),

    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// The model reply was not the JSON we asked for
    Json {
        message: String,
        body: Option<String>,
    },

    /// The endpoint returned an error status code
    Api { status: u16, message: String },

    /// Rate limited by the endpoint
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// The reply had no message content
    EmptyReply,

    /// The text did not mention every part of the query
    Incomplete { missing: Vec<&'static str> },
}

impl IntentError {
    /// Whether the failure came from the model endpoint rather than the
    /// user's text.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, IntentError::Incomplete { .. })
    }
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::Config(message) => write!(f, "invalid model client configuration: {message}"),
            IntentError::Http(e) => write!(f, "HTTP error: {e}"),
            IntentError::Json { message, body } => {
                write!(f, "couldn't parse model reply: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            IntentError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            IntentError::RateLimited => write!(f, "rate limited by model endpoint"),
            IntentError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            IntentError::EmptyReply => write!(f, "model reply had no content"),
            IntentError::Incomplete { missing } => {
                write!(f, "couldn't tell the {} from your message", missing.join(", "))
            }
        }
    }
}

impl std::error::Error for IntentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntentError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IntentError {
    fn from(err: reqwest::Error) -> Self {
        IntentError::Http(err)
    }
}
