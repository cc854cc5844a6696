//! Advisory confidence scoring collaborator.

use async_trait::async_trait;
use rumor_types::Category;

/// A score returned by a confidence-scoring service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvisoryScore {
    /// Confidence that the claim is true, 0–100.
    pub score: u8,
    /// Free-text reasoning.
    pub analysis: String,
}

/// Scores a claim's plausibility.
///
/// Strictly advisory: implementations return `None` on any failure and the
/// caller attaches nothing. Claim creation never waits on, and never rolls
/// back because of, an annotator.
#[async_trait]
pub trait ConfidenceAnnotator: Send + Sync {
    async fn annotate(&self, content: &str, category: Category) -> Option<AdvisoryScore>;
}
