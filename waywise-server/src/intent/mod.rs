//! Natural-language front end.
//!
//! Turns a chat message such as "cheapest way from tims sqr to the park"
//! into a [`TravelQuery`](crate::domain::TravelQuery). Two extractors are
//! available:
//! - a chat-completions client for an OpenAI-compatible model server
//!   (LM Studio by default)
//! - a keyword matcher that needs no model
//!
//! Either way the result is raw text; the recommender does the fuzzy
//! location matching and priority validation.

mod client;
mod error;
mod extractor;
mod keyword;
mod types;

pub use client::{DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_MODEL, IntentClient, IntentConfig};
pub use error::IntentError;
pub use extractor::IntentExtractor;
pub use keyword::KeywordExtractor;
pub use types::{ExtractedIntent, Preferences, parse_reply};
