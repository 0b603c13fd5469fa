//! At-most-once claim ledger for offers.
//!
//! `claim` performs its membership check and insert under a single `&mut self`
//! borrow, so a ledger shared across threads behind a `Mutex` can never accept
//! two claims for the same offer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

const CLAIM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static CLAIM_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimRecord {
    pub offer_id: String,
    pub claim_id: String,
    pub claimed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Accepted(ClaimRecord),
    /// The offer already has a record; nothing was changed.
    AlreadyClaimed { offer_id: String },
    /// The offer id is not in the catalog; nothing was changed.
    UnknownOffer { offer_id: String },
}

impl ClaimOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ClaimOutcome::Accepted(_))
    }

    #[must_use]
    pub fn record(&self) -> Option<&ClaimRecord> {
        match self {
            ClaimOutcome::Accepted(record) => Some(record),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaimLedger {
    /// Insertion order; newest last.
    records: Vec<ClaimRecord>,
    by_offer: HashMap<String, usize>,
}

impl ClaimLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `offer_id` at the current time.
    pub fn claim(&mut self, offer_id: &str) -> ClaimOutcome {
        self.claim_at(offer_id, Utc::now())
    }

    /// Claims `offer_id` with an explicit timestamp.
    ///
    /// Returns [`ClaimOutcome::AlreadyClaimed`] without touching the ledger if
    /// the offer already has a record.
    pub fn claim_at(&mut self, offer_id: &str, claimed_at: DateTime<Utc>) -> ClaimOutcome {
        match self.by_offer.entry(offer_id.to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(offer_id, "claim rejected: offer already claimed");
                ClaimOutcome::AlreadyClaimed {
                    offer_id: offer_id.to_string(),
                }
            }
            Entry::Vacant(slot) => {
                let record = ClaimRecord {
                    offer_id: offer_id.to_string(),
                    claim_id: generate_claim_id(claimed_at),
                    claimed_at,
                };
                slot.insert(self.records.len());
                self.records.push(record.clone());
                tracing::info!(offer_id, claim_id = %record.claim_id, "offer claimed");
                ClaimOutcome::Accepted(record)
            }
        }
    }

    #[must_use]
    pub fn is_claimed(&self, offer_id: &str) -> bool {
        self.by_offer.contains_key(offer_id)
    }

    #[must_use]
    pub fn get(&self, offer_id: &str) -> Option<&ClaimRecord> {
        self.by_offer.get(offer_id).map(|&i| &self.records[i])
    }

    /// All records, most recently claimed first.
    #[must_use]
    pub fn claimed_offers(&self) -> Vec<&ClaimRecord> {
        self.records.iter().rev().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `claim_<unix-millis>_<sequence>_<random>`.
///
/// The sequence is process-wide and monotonic, which makes ids unique for the
/// process lifetime even when two claims share a millisecond.
fn generate_claim_id(claimed_at: DateTime<Utc>) -> String {
    let sequence = CLAIM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut rng = rand::rng();
    let suffix: String = (0..CLAIM_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!(
        "claim_{}_{sequence}_{suffix}",
        claimed_at.timestamp_millis()
    )
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
