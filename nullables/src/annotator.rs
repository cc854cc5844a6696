//! Nullable confidence annotator — canned scores for testing.

use async_trait::async_trait;
use rumor_market::{AdvisoryScore, ConfidenceAnnotator};
use rumor_types::Category;

/// An annotator that returns a fixed score, or nothing at all.
///
/// `NullAnnotator::failing()` models an unreachable scoring service so
/// tests can assert that annotation failures never affect claim creation.
pub struct NullAnnotator {
    response: Option<AdvisoryScore>,
}

impl NullAnnotator {
    /// Always returns the given score.
    pub fn with_score(score: u8, analysis: impl Into<String>) -> Self {
        Self {
            response: Some(AdvisoryScore {
                score,
                analysis: analysis.into(),
            }),
        }
    }

    /// Never returns a score, like a service that is down.
    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl ConfidenceAnnotator for NullAnnotator {
    async fn annotate(&self, _content: &str, _category: Category) -> Option<AdvisoryScore> {
        self.response.clone()
    }
}
