use geopromo_core::Zone;
use serde::Serialize;

use crate::ledger::ClaimLedger;

/// A zone transition caused by a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ZoneEvent {
    Exited { zone_id: String },
    Entered { zone_id: String, first_visit: bool },
}

/// Per-session mutable state: current zone, visit history, and claims.
///
/// `visited_zone_ids` is append-only and never holds duplicates; entries keep
/// the position of their first visit.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current_zone_id: Option<String>,
    visited_zone_ids: Vec<String>,
    claim_ledger: ClaimLedger,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_zone_id(&self) -> Option<&str> {
        self.current_zone_id.as_deref()
    }

    #[must_use]
    pub fn visited_zone_ids(&self) -> &[String] {
        &self.visited_zone_ids
    }

    #[must_use]
    pub fn claim_ledger(&self) -> &ClaimLedger {
        &self.claim_ledger
    }

    pub fn claim_ledger_mut(&mut self) -> &mut ClaimLedger {
        &mut self.claim_ledger
    }

    /// Records the outcome of a resolution and returns the transitions it caused.
    ///
    /// A present zone becomes current and is appended to the history on its first
    /// visit. An absent zone clears the current zone and leaves history alone.
    /// Moving between zones yields `Exited` followed by `Entered`; staying put
    /// yields nothing.
    pub fn on_zone_resolved(&mut self, zone: Option<&Zone>) -> Vec<ZoneEvent> {
        let next = zone.map(|z| z.id.as_str());
        if self.current_zone_id.as_deref() == next {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);

        if let Some(previous) = self.current_zone_id.take() {
            tracing::debug!(zone_id = %previous, "exited zone");
            events.push(ZoneEvent::Exited { zone_id: previous });
        }

        if let Some(zone) = zone {
            let first_visit = !self.visited_zone_ids.contains(&zone.id);
            if first_visit {
                self.visited_zone_ids.push(zone.id.clone());
            }
            tracing::debug!(zone_id = %zone.id, first_visit, "entered zone");
            self.current_zone_id = Some(zone.id.clone());
            events.push(ZoneEvent::Entered {
                zone_id: zone.id.clone(),
                first_visit,
            });
        }

        events
    }
}
