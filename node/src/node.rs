//! The main Rumor node struct — wires the market engines together.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rumor_ledger::{AccountBalance, StakeLedger};
use rumor_market::{
    BatchClaimEntry, Claim, ClaimRegistry, ConfidenceAnnotator, EventLog, MarketEvent,
    ResolutionEngine, VotingEngine,
};
use rumor_reputation::{LeaderboardMetric, ReputationTracker, UserStats};
use rumor_types::{
    AccountId, Category, ClaimId, Clock, GuiAmount, MarketParams, SystemClock, GUI_UNIT,
};

use crate::confidence::HttpAnnotator;
use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::metrics::NodeMetrics;

/// Everything behind the node's single mutex.
///
/// Holding all four components under one lock makes every public operation
/// a serializable transaction: tally increments, escrow transfers, and the
/// claimed-flag check-and-set can never interleave with a concurrent
/// caller. The critical sections are short and never perform I/O.
struct CoreState {
    ledger: StakeLedger,
    registry: ClaimRegistry,
    reputation: ReputationTracker,
    events: EventLog,
}

/// A running Rumor node.
pub struct RumorNode {
    params: MarketParams,
    resolution: ResolutionEngine,
    state: Mutex<CoreState>,
    clock: Arc<dyn Clock>,
    annotator: Option<Arc<dyn ConfidenceAnnotator>>,
    annotation_timeout: Duration,
    metrics: NodeMetrics,
}

impl RumorNode {
    /// Build a node from configuration, using the system clock.
    pub fn new(config: NodeConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a node with an explicit clock (tests inject a null clock so
    /// expiry is driven deterministically).
    pub fn with_clock(config: NodeConfig, clock: Arc<dyn Clock>) -> Self {
        let annotator: Option<Arc<dyn ConfidenceAnnotator>> =
            config.confidence_api_url.as_ref().map(|url| {
                Arc::new(HttpAnnotator::new(
                    url.clone(),
                    Duration::from_secs(config.confidence_timeout_secs),
                )) as Arc<dyn ConfidenceAnnotator>
            });
        Self {
            params: config.market.clone(),
            resolution: ResolutionEngine::new(AccountId::new(config.resolver.clone())),
            state: Mutex::new(CoreState {
                ledger: StakeLedger::new(),
                registry: ClaimRegistry::new(),
                reputation: ReputationTracker::new(),
                events: EventLog::new(),
            }),
            clock,
            annotator,
            annotation_timeout: Duration::from_secs(config.confidence_timeout_secs),
            metrics: NodeMetrics::new(),
        }
    }

    /// Replace the annotator (tests inject a canned one).
    pub fn with_annotator(mut self, annotator: Arc<dyn ConfidenceAnnotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }

    fn state(&self) -> MutexGuard<'_, CoreState> {
        self.state.lock().expect("core state mutex poisoned")
    }

    fn refresh_gauges(&self, state: &CoreState) {
        self.metrics
            .active_claims
            .set(state.registry.active_claims().len() as i64);
        self.metrics
            .treasury_gui
            .set((state.ledger.treasury().raw() / GUI_UNIT) as i64);
        self.metrics
            .escrow_gui
            .set((state.ledger.total_escrowed().raw() / GUI_UNIT) as i64);
    }

    // ── Balance operations ──────────────────────────────────────────────

    /// Credit an account from outside the system (faucet or token bridge).
    pub fn deposit(&self, account: &AccountId, amount: GuiAmount) -> Result<(), NodeError> {
        let mut state = self.state();
        state.ledger.deposit(account, amount)?;
        Ok(())
    }

    /// Debit an account out of the system.
    pub fn withdraw(&self, account: &AccountId, amount: GuiAmount) -> Result<(), NodeError> {
        let mut state = self.state();
        state.ledger.withdraw(account, amount)?;
        Ok(())
    }

    /// Available and escrowed balances for an account.
    pub fn balance_of(&self, account: &AccountId) -> AccountBalance {
        let state = self.state();
        AccountBalance {
            available: state.ledger.available(account),
            escrowed: state.ledger.escrowed(account),
        }
    }

    /// Treasury balance (fees plus rounding remainders).
    pub fn treasury(&self) -> GuiAmount {
        self.state().ledger.treasury()
    }

    /// Grand total of all value held by the node.
    pub fn total_in_system(&self) -> GuiAmount {
        self.state().ledger.total_in_system()
    }

    // ── Claim lifecycle ─────────────────────────────────────────────────

    /// Submit a claim and collect the submission fee.
    pub fn submit_claim(
        &self,
        submitter: &AccountId,
        content: String,
        tags: Vec<String>,
        category: Category,
        duration_secs: Option<u64>,
    ) -> Result<ClaimId, NodeError> {
        let now = self.clock.now();
        let claim_id = {
            let mut state = self.state();
            let state = &mut *state;
            let claim_id = state.registry.submit_claim(
                &mut state.ledger,
                &self.params,
                submitter,
                content,
                tags,
                category,
                duration_secs,
                now,
            )?;
            state.events.append(MarketEvent::ClaimSubmitted {
                claim_id,
                submitter: submitter.clone(),
                category,
            });
            self.refresh_gauges(state);
            claim_id
        };
        self.metrics.claims_submitted.inc();
        Ok(claim_id)
    }

    /// Submit a claim and kick off best-effort confidence annotation in the
    /// background.
    ///
    /// The returned id is committed before annotation starts; a scoring
    /// service that is slow or down never affects the claim. Requires a
    /// tokio runtime; without one the claim is still committed and only
    /// the annotation is skipped.
    pub fn submit_claim_annotated(
        self: &Arc<Self>,
        submitter: &AccountId,
        content: String,
        tags: Vec<String>,
        category: Category,
        duration_secs: Option<u64>,
    ) -> Result<ClaimId, NodeError> {
        let claim_id = self.submit_claim(submitter, content, tags, category, duration_secs)?;
        if self.annotator.is_some() {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let node = Arc::clone(self);
                handle.spawn(async move {
                    node.annotate_now(claim_id).await;
                });
            }
        }
        Ok(claim_id)
    }

    /// Run confidence annotation for a claim and attach the result.
    ///
    /// Returns whether an annotation was attached. Normally invoked from
    /// the background task spawned by [`RumorNode::submit_claim_annotated`];
    /// tests call it directly for determinism.
    pub async fn annotate_now(&self, claim_id: ClaimId) -> bool {
        let Some(annotator) = &self.annotator else {
            return false;
        };
        let Ok((content, category)) = ({
            let state = self.state();
            state
                .registry
                .get_claim(claim_id)
                .map(|c| (c.content.clone(), c.category))
        }) else {
            return false;
        };

        let scored =
            tokio::time::timeout(self.annotation_timeout, annotator.annotate(&content, category))
                .await;
        match scored {
            Ok(Some(advisory)) => {
                let mut state = self.state();
                let attached = state
                    .registry
                    .annotate_confidence(
                        claim_id,
                        advisory.score,
                        advisory.analysis,
                        self.clock.now(),
                    )
                    .is_ok();
                if attached {
                    state.events.append(MarketEvent::ConfidenceAnnotated {
                        claim_id,
                        score: advisory.score,
                    });
                }
                attached
            }
            _ => {
                self.metrics.annotation_failures.inc();
                tracing::debug!(claim_id, "confidence annotation unavailable");
                false
            }
        }
    }

    /// Cast a staked vote on a claim.
    pub fn vote(
        &self,
        voter: &AccountId,
        claim_id: ClaimId,
        side: bool,
        stake: GuiAmount,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        let mut state = self.state();
        let state = &mut *state;
        VotingEngine.vote(
            &mut state.registry,
            &mut state.ledger,
            &mut state.reputation,
            &self.params,
            claim_id,
            voter,
            side,
            stake,
            now,
        )?;
        state.events.append(MarketEvent::VoteCast {
            claim_id,
            voter: voter.clone(),
            side,
            stake,
        });
        self.refresh_gauges(state);
        self.metrics.votes_cast.inc();
        Ok(())
    }

    /// Resolve a claim. Restricted to the configured resolver.
    pub fn resolve(
        &self,
        caller: &AccountId,
        claim_id: ClaimId,
        outcome: bool,
    ) -> Result<(), NodeError> {
        let now = self.clock.now();
        let mut state = self.state();
        let state = &mut *state;
        self.resolution.resolve(
            &mut state.registry,
            &mut state.ledger,
            caller,
            claim_id,
            outcome,
            now,
        )?;
        let reward_pool = state.registry.get_claim(claim_id)?.reward_pool;
        state.events.append(MarketEvent::ClaimResolved {
            claim_id,
            outcome,
            reward_pool,
        });
        self.refresh_gauges(state);
        self.metrics.claims_resolved.inc();
        Ok(())
    }

    /// Settle one voter's reward for a resolved claim.
    pub fn claim_rewards(
        &self,
        voter: &AccountId,
        claim_id: ClaimId,
    ) -> Result<GuiAmount, NodeError> {
        let mut state = self.state();
        let state = &mut *state;
        let amount = self.resolution.claim_rewards(
            &mut state.registry,
            &mut state.ledger,
            &mut state.reputation,
            claim_id,
            voter,
        )?;
        state.events.append(MarketEvent::RewardsClaimed {
            claim_id,
            voter: voter.clone(),
            amount,
        });
        self.refresh_gauges(state);
        self.metrics.rewards_claimed.inc();
        Ok(amount)
    }

    /// Settle rewards for several claims; per-item failures are reported,
    /// not fatal.
    pub fn batch_claim_rewards(
        &self,
        voter: &AccountId,
        claim_ids: &[ClaimId],
    ) -> Vec<BatchClaimEntry> {
        let mut state = self.state();
        let state = &mut *state;
        let entries = self.resolution.batch_claim_rewards(
            &mut state.registry,
            &mut state.ledger,
            &mut state.reputation,
            claim_ids,
            voter,
        );
        for entry in entries.iter().filter(|e| e.error.is_none()) {
            state.events.append(MarketEvent::RewardsClaimed {
                claim_id: entry.claim_id,
                voter: voter.clone(),
                amount: entry.amount,
            });
            self.metrics.rewards_claimed.inc();
        }
        self.refresh_gauges(state);
        entries
    }

    /// Whether `voter` currently has an unclaimed reward on `claim_id`.
    pub fn can_claim_reward(&self, voter: &AccountId, claim_id: ClaimId) -> bool {
        let state = self.state();
        self.resolution
            .can_claim_reward(&state.registry, claim_id, voter)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn get_claim(&self, claim_id: ClaimId) -> Result<Claim, NodeError> {
        Ok(self.state().registry.get_claim(claim_id)?.clone())
    }

    pub fn get_user_stats(&self, account: &AccountId) -> Option<UserStats> {
        self.state().reputation.stats(account).copied()
    }

    pub fn get_active_claims(&self) -> Vec<ClaimId> {
        self.state().registry.active_claims()
    }

    pub fn get_total_claims(&self) -> u64 {
        self.state().registry.total_claims()
    }

    pub fn get_claim_voters(&self, claim_id: ClaimId) -> Result<Vec<AccountId>, NodeError> {
        Ok(self.state().registry.claim_voters(claim_id)?)
    }

    pub fn leaderboard(
        &self,
        metric: LeaderboardMetric,
        limit: usize,
    ) -> Vec<(AccountId, UserStats)> {
        self.state().reputation.leaderboard(metric, limit)
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Register a synchronous listener for future events.
    pub fn subscribe_events(&self, listener: Box<dyn Fn(&MarketEvent) + Send + Sync>) {
        self.state().events.subscribe(listener);
    }

    /// Events appended at or after `offset`, for polling consumers.
    pub fn events_from(&self, offset: usize) -> Vec<MarketEvent> {
        self.state().events.events_from(offset).to_vec()
    }

    /// Number of events appended so far.
    pub fn event_count(&self) -> usize {
        self.state().events.len()
    }
}
