//! Prometheus metrics for the Rumor node.
//!
//! Exposes counters and gauges covering claim, voting, and settlement
//! activity.  The [`NodeMetrics`] struct owns a dedicated [`Registry`]
//! that an operator-facing endpoint can encode into the Prometheus text
//! exposition format.

use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};

/// Central collection of all node-level Prometheus metrics.
pub struct NodeMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total claims submitted.
    pub claims_submitted: IntCounter,
    /// Total votes recorded.
    pub votes_cast: IntCounter,
    /// Total claims resolved.
    pub claims_resolved: IntCounter,
    /// Total reward settlements (successful `claim_rewards` calls).
    pub rewards_claimed: IntCounter,
    /// Confidence annotations that failed or timed out.
    pub annotation_failures: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Claims currently unresolved.
    pub active_claims: IntGauge,
    /// Treasury balance in whole GUI (display resolution).
    pub treasury_gui: IntGauge,
    /// Total escrowed stake in whole GUI (display resolution).
    pub escrow_gui: IntGauge,
}

impl NodeMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let claims_submitted = register_int_counter_with_registry!(
            Opts::new("rumor_claims_submitted_total", "Total claims submitted"),
            registry
        )
        .expect("failed to register claims_submitted counter");

        let votes_cast = register_int_counter_with_registry!(
            Opts::new("rumor_votes_cast_total", "Total votes recorded"),
            registry
        )
        .expect("failed to register votes_cast counter");

        let claims_resolved = register_int_counter_with_registry!(
            Opts::new("rumor_claims_resolved_total", "Total claims resolved"),
            registry
        )
        .expect("failed to register claims_resolved counter");

        let rewards_claimed = register_int_counter_with_registry!(
            Opts::new("rumor_rewards_claimed_total", "Total reward settlements"),
            registry
        )
        .expect("failed to register rewards_claimed counter");

        let annotation_failures = register_int_counter_with_registry!(
            Opts::new(
                "rumor_annotation_failures_total",
                "Confidence annotations that failed or timed out"
            ),
            registry
        )
        .expect("failed to register annotation_failures counter");

        let active_claims = register_int_gauge_with_registry!(
            Opts::new("rumor_active_claims", "Claims currently unresolved"),
            registry
        )
        .expect("failed to register active_claims gauge");

        let treasury_gui = register_int_gauge_with_registry!(
            Opts::new("rumor_treasury_gui", "Treasury balance in whole GUI"),
            registry
        )
        .expect("failed to register treasury_gui gauge");

        let escrow_gui = register_int_gauge_with_registry!(
            Opts::new("rumor_escrow_gui", "Escrowed stake in whole GUI"),
            registry
        )
        .expect("failed to register escrow_gui gauge");

        Self {
            registry,
            claims_submitted,
            votes_cast,
            claims_resolved,
            rewards_claimed,
            annotation_failures,
            active_claims,
            treasury_gui,
            escrow_gui,
        }
    }
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}
