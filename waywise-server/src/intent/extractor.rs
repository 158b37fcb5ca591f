use tracing::warn;

use crate::cache::CachedIntentClient;
use crate::domain::TravelQuery;
use crate::recommend::Recommendation;

use super::error::IntentError;
use super::keyword::KeywordExtractor;

/// The configured way of turning chat messages into queries.
pub enum IntentExtractor {
    /// Ask a chat-completions model, with cached replies.
    Model(CachedIntentClient),
    /// Match phrasing and keywords locally.
    Keyword(KeywordExtractor),
}

impl IntentExtractor {
    pub async fn extract(&self, message: &str) -> Result<TravelQuery, IntentError> {
        match self {
            IntentExtractor::Model(client) => client.extract(message).await,
            IntentExtractor::Keyword(extractor) => extractor.extract(message),
        }
    }

    /// A model-written comment on `rec`. `None` for the keyword extractor,
    /// and when the model call fails.
    pub async fn explain(&self, query: &TravelQuery, rec: &Recommendation) -> Option<String> {
        let IntentExtractor::Model(client) = self else {
            return None;
        };

        match client.client().explain(query, rec).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "skipping recommendation explanation");
                None
            }
        }
    }

    /// Short name for logs and the about page.
    pub fn name(&self) -> &'static str {
        match self {
            IntentExtractor::Model(_) => "model",
            IntentExtractor::Keyword(_) => "keyword",
        }
    }
}

impl Default for IntentExtractor {
    fn default() -> Self {
        IntentExtractor::Keyword(KeywordExtractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keyword_extractor_by_default() {
        let extractor = IntentExtractor::default();
        assert_eq!(extractor.name(), "keyword");

        let q = extractor
            .extract("from Central Park to Times Square, fastest")
            .await
            .unwrap();
        assert_eq!(q.priority, "shortest_time");
        assert_eq!(q.destination, "Times Square");
    }

    #[tokio::test]
    async fn keyword_extractor_does_not_explain() {
        use crate::catalog::{DEFAULT_SEED, generate};
        use crate::recommend::Recommender;
        use crate::resolve::LocationResolver;

        let catalog = generate(DEFAULT_SEED).unwrap();
        let resolver = LocationResolver::default();
        let query = TravelQuery::new("Central_Park", "Times_Square", "shortest_time");
        let rec = Recommender::new(&catalog, &resolver).recommend(&query).unwrap();

        assert!(IntentExtractor::default().explain(&query, &rec).await.is_none());
    }
}
