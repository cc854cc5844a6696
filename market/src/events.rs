//! Domain events emitted after committed market transitions.

use rumor_types::{AccountId, Category, ClaimId, GuiAmount};

/// Market-level events that observers can consume via the [`EventLog`].
///
/// Events are appended only after the corresponding transition has
/// committed, so a listener can never observe an event for state that was
/// rolled back.
#[derive(Clone, Debug)]
pub enum MarketEvent {
    /// A claim was submitted and its fee collected.
    ClaimSubmitted {
        claim_id: ClaimId,
        submitter: AccountId,
        category: Category,
    },
    /// A vote was recorded and its stake escrowed.
    VoteCast {
        claim_id: ClaimId,
        voter: AccountId,
        side: bool,
        stake: GuiAmount,
    },
    /// A claim's outcome and reward pool were fixed.
    ClaimResolved {
        claim_id: ClaimId,
        outcome: bool,
        reward_pool: GuiAmount,
    },
    /// A voter settled their reward.
    RewardsClaimed {
        claim_id: ClaimId,
        voter: AccountId,
        amount: GuiAmount,
    },
    /// An advisory confidence score was attached.
    ConfidenceAnnotated { claim_id: ClaimId, score: u8 },
}

/// Append-only log of domain events with synchronous fan-out.
///
/// Listeners are invoked inline on the emitting thread; keep handlers fast.
/// The log itself is retained so late consumers (indexers, notifiers) can
/// poll from any offset instead of depending on having been subscribed at
/// emission time.
pub struct EventLog {
    events: Vec<MarketEvent>,
    listeners: Vec<Box<dyn Fn(&MarketEvent) + Send + Sync>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&MarketEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    /// Append an event and notify every listener.
    pub fn append(&mut self, event: MarketEvent) {
        for listener in &self.listeners {
            listener(&event);
        }
        self.events.push(event);
    }

    /// All events appended so far, oldest first.
    pub fn events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Events from `offset` onward, for polling consumers.
    pub fn events_from(&self, offset: usize) -> &[MarketEvent] {
        &self.events[offset.min(self.events.len())..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
