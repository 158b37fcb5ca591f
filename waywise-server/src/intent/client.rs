//! Chat-completions client for intent extraction.
//!
//! Sends the user's message to an OpenAI-compatible endpoint with a system
//! prompt asking for a small JSON object, then parses that object into a
//! [`TravelQuery`]. The same endpoint can comment on a finished
//! recommendation.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::TravelQuery;
use crate::recommend::Recommendation;

use super::error::IntentError;
use super::types::{ChatMessage, ChatRequest, ChatResponse, parse_reply};

/// Default base URL: a model server on the local machine.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1234/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "qwen2.5-coder-32b-instruct";

/// Placeholder key accepted by local model servers.
pub const DEFAULT_API_KEY: &str = "lm-studio";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

const SYSTEM_PROMPT: &str = "\
You extract travel requests. Reply with a single JSON object and nothing else:
{\"origin\": string|null, \"destination\": string|null, \"preferences\": {\"priority\": string|null}}
priority must be one of \"lowest_cost\", \"minimal_walking\", \"shortest_time\", \
\"least_environmental_cost\".
Copy place names as the user wrote them. Use null for anything the user did not say.";

const EXPLAIN_PROMPT: &str = "\
You are a travel assistant. The user's message is a JSON object with a travel request \
and the option recommended for it. In a few sentences, explain the choice and suggest \
improvements to the trip.";

/// Configuration for the intent client.
#[derive(Debug, Clone)]
pub struct IntentConfig {
    /// Bearer token sent with every request
    pub api_key: String,
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model name passed in the request body
    pub model: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl IntentConfig {
    /// Create a config for the endpoint at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 60,
        }
    }
}

/// Client for a chat-completions endpoint.
///
/// A semaphore bounds in-flight requests; local model servers usually
/// handle one or two generations at a time.
#[derive(Debug, Clone)]
pub struct IntentClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    semaphore: Arc<Semaphore>,
}

impl IntentClient {
    /// Create a new client with the given configuration.
    pub fn new(config: IntentConfig) -> Result<Self, IntentError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| IntentError::Config("API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for the origin, destination and priority in `message`.
    ///
    /// The returned query holds the text exactly as the model copied it;
    /// location matching and priority validation happen later.
    pub async fn extract(&self, message: &str) -> Result<TravelQuery, IntentError> {
        let messages = vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: message,
            },
        ];

        let content = self.complete(messages, 0.0).await?;
        parse_reply(&content)
    }

    /// Ask the model to comment on a recommendation and suggest improvements.
    pub async fn explain(
        &self,
        query: &TravelQuery,
        rec: &Recommendation,
    ) -> Result<String, IntentError> {
        let input = json!({
            "origin": query.origin,
            "destination": query.destination,
            "preferences": { "priority": query.priority },
            "recommendation": rec,
        })
        .to_string();

        let messages = vec![
            ChatMessage {
                role: "system",
                content: EXPLAIN_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: &input,
            },
        ];

        let content = self.complete(messages, 0.7).await?;
        let content = content.trim();
        if content.is_empty() {
            return Err(IntentError::EmptyReply);
        }
        Ok(content.to_string())
    }

    /// Post one chat-completions request and return the reply text.
    async fn complete(
        &self,
        messages: Vec<ChatMessage<'_>>,
        temperature: f32,
    ) -> Result<String, IntentError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| IntentError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature,
        };

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(IntentError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IntentError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntentError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let reply: ChatResponse = serde_json::from_str(&body).map_err(|e| IntentError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(IntentError::EmptyReply)?;

        debug!(model = %self.model, reply = %content, "model replied");
        Ok(content)
    }
}
