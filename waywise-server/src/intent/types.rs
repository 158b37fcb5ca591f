//! Chat-completions wire types and reply parsing.
//!
//! Requests follow the OpenAI chat-completions shape, which LM Studio and
//! most local model servers accept.

use serde::{Deserialize, Serialize};

use crate::domain::TravelQuery;

use super::error::IntentError;

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

/// A single chat message.
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Response body for chat completions. Only the fields we read.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// `preferences` object of the extracted intent.
#[derive(Debug, Default, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub priority: Option<String>,
}

/// The JSON object the model is asked to produce.
///
/// Any field may be null when the model couldn't decide. A top-level
/// `priority` is accepted as well as the nested one.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractedIntent {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl ExtractedIntent {
    /// Convert to a query, failing if any part is missing or blank.
    pub fn into_query(self) -> Result<TravelQuery, IntentError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let origin = present(self.origin);
        let destination = present(self.destination);
        let priority = present(self.preferences.and_then(|p| p.priority)).or(present(self.priority));

        match (origin, destination, priority) {
            (Some(origin), Some(destination), Some(priority)) => {
                Ok(TravelQuery::new(origin, destination, priority))
            }
            (origin, destination, priority) => {
                let mut missing = Vec::new();
                if origin.is_none() {
                    missing.push("origin");
                }
                if destination.is_none() {
                    missing.push("destination");
                }
                if priority.is_none() {
                    missing.push("priority");
                }
                Err(IntentError::Incomplete { missing })
            }
        }
    }
}

/// Strip a surrounding Markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") up to the first newline
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the model's message content into a query.
pub fn parse_reply(content: &str) -> Result<TravelQuery, IntentError> {
    let json = strip_code_fence(content);
    let intent: ExtractedIntent = serde_json::from_str(json).map_err(|e| IntentError::Json {
        message: e.to_string(),
        body: Some(content.chars().take(500).collect()),
    })?;
    intent.into_query()
}
