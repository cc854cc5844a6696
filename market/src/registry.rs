//! Claim registry — creation, lookup, and content constraints.

use crate::claim::{Claim, ConfidenceAnnotation};
use crate::error::MarketError;
use rumor_ledger::StakeLedger;
use rumor_types::{AccountId, Category, ClaimId, GuiAmount, MarketParams, Timestamp};
use std::collections::BTreeMap;

/// Stores every claim ever submitted, keyed by sequential id.
///
/// Claims are never deleted; resolved claims stay queryable forever. The
/// registry is the sole allocator of claim ids and, through the resolution
/// engine, the sole writer of the `resolved`/`outcome` fields.
#[derive(Clone, Debug, Default)]
pub struct ClaimRegistry {
    claims: BTreeMap<ClaimId, Claim>,
    next_id: ClaimId,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a new claim.
    ///
    /// Validates content length, tag count and length, and the optional
    /// voting duration, then debits the submission fee into the treasury
    /// and stores the claim with zeroed tallies. Validation happens before
    /// any mutation: a failed submission leaves no trace.
    #[allow(clippy::too_many_arguments)]
    pub fn submit_claim(
        &mut self,
        ledger: &mut StakeLedger,
        params: &MarketParams,
        submitter: &AccountId,
        content: String,
        tags: Vec<String>,
        category: Category,
        duration_secs: Option<u64>,
        now: Timestamp,
    ) -> Result<ClaimId, MarketError> {
        let len = content.chars().count();
        if len < params.min_content_len || len > params.max_content_len {
            return Err(MarketError::InvalidContent {
                len,
                min: params.min_content_len,
                max: params.max_content_len,
            });
        }
        if tags.len() > params.max_tags {
            return Err(MarketError::TooManyTags {
                count: tags.len(),
                max: params.max_tags,
            });
        }
        for tag in &tags {
            let tag_len = tag.chars().count();
            if tag_len > params.max_tag_len {
                return Err(MarketError::TagTooLong {
                    len: tag_len,
                    max: params.max_tag_len,
                });
            }
        }
        let duration = duration_secs.unwrap_or(params.default_voting_duration_secs);
        if duration < params.min_voting_duration_secs || duration > params.max_voting_duration_secs
        {
            return Err(MarketError::InvalidDuration {
                secs: duration,
                min: params.min_voting_duration_secs,
                max: params.max_voting_duration_secs,
            });
        }
        let available = ledger.available(submitter);
        if available < params.submission_fee {
            return Err(MarketError::InsufficientBalance {
                needed: params.submission_fee.raw(),
                available: available.raw(),
            });
        }

        ledger.collect_fee(submitter, params.submission_fee)?;

        let id = self.next_id;
        self.next_id += 1;
        let claim = Claim {
            id,
            submitter: submitter.clone(),
            content,
            tags,
            category,
            created_at: now,
            expires_at: now.plus_secs(duration),
            true_votes: 0,
            false_votes: 0,
            true_stake: GuiAmount::ZERO,
            false_stake: GuiAmount::ZERO,
            resolved: false,
            outcome: None,
            reward_pool: GuiAmount::ZERO,
            votes: Vec::new(),
            confidence: None,
        };
        self.claims.insert(id, claim);
        tracing::info!(claim_id = id, %submitter, %category, "claim submitted");
        Ok(id)
    }

    pub fn get_claim(&self, id: ClaimId) -> Result<&Claim, MarketError> {
        self.claims.get(&id).ok_or(MarketError::NotFound(id))
    }

    pub(crate) fn get_claim_mut(&mut self, id: ClaimId) -> Result<&mut Claim, MarketError> {
        self.claims.get_mut(&id).ok_or(MarketError::NotFound(id))
    }

    /// Ids of all unresolved claims, ascending.
    pub fn active_claims(&self) -> Vec<ClaimId> {
        self.claims
            .values()
            .filter(|c| !c.resolved)
            .map(|c| c.id)
            .collect()
    }

    /// Number of claims ever submitted.
    pub fn total_claims(&self) -> u64 {
        self.next_id
    }

    /// Voter identities for a claim, ordered by first vote.
    pub fn claim_voters(&self, id: ClaimId) -> Result<Vec<AccountId>, MarketError> {
        let claim = self.get_claim(id)?;
        Ok(claim.votes.iter().map(|v| v.voter.clone()).collect())
    }

    /// Attach an advisory confidence annotation.
    ///
    /// Best-effort by contract: the caller runs the scoring service outside
    /// any lock and simply drops the annotation if the claim is gone or the
    /// service failed.
    pub fn annotate_confidence(
        &mut self,
        id: ClaimId,
        score: u8,
        analysis: String,
        now: Timestamp,
    ) -> Result<(), MarketError> {
        let claim = self.get_claim_mut(id)?;
        claim.confidence = Some(ConfidenceAnnotation {
            score: score.min(100),
            analysis,
            annotated_at: now,
        });
        Ok(())
    }
}
