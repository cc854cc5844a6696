//! HTTP confidence annotator — calls an external AI scoring service.
//!
//! The service receives the claim content and category and responds with a
//! JSON body like `{"confidence": 72, "reasoning": "..."}`. Every failure
//! mode (connection refused, timeout, malformed body) degrades to `None`:
//! the claim simply carries no annotation.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use rumor_market::{AdvisoryScore, ConfidenceAnnotator};
use rumor_types::Category;

/// Response body expected from the scoring service.
#[derive(Debug, Deserialize)]
struct ScoreResponse {
    confidence: u8,
    #[serde(default)]
    reasoning: String,
}

/// Annotator backed by an HTTP scoring service.
pub struct HttpAnnotator {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpAnnotator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ConfidenceAnnotator for HttpAnnotator {
    async fn annotate(&self, content: &str, category: Category) -> Option<AdvisoryScore> {
        let request = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({
                "content": content,
                "category": category.to_string(),
            }))
            .timeout(self.timeout)
            .send();

        let response = match request.await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(%err, "confidence service unreachable");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "confidence service error");
            return None;
        }
        match response.json::<ScoreResponse>().await {
            Ok(body) => Some(AdvisoryScore {
                score: body.confidence.min(100),
                analysis: body.reasoning,
            }),
            Err(err) => {
                tracing::debug!(%err, "confidence response malformed");
                None
            }
        }
    }
}
