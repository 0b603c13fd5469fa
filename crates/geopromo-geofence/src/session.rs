//! Session-scoped controller that owns one user's geofencing state.
//!
//! Samples are handled one at a time: each call to
//! [`GeofenceSession::handle_sample`] resolves, tracks, and returns before the
//! next sample is accepted.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use geopromo_core::{Catalog, Coordinate, ExpiryPolicy, Offer, OfferCategory, Zone};
use serde::Serialize;
use uuid::Uuid;

use crate::ledger::{ClaimOutcome, ClaimRecord};
use crate::location::{LocationSample, LocationStatus};
use crate::query::offers_by_category;
use crate::resolver::{available_offers, resolve_zone};
use crate::state::{SessionState, ZoneEvent};

/// Result of handling one location sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUpdate {
    pub location_status: LocationStatus,
    pub current_zone_id: Option<String>,
    pub events: Vec<ZoneEvent>,
}

#[derive(Debug)]
pub struct GeofenceSession {
    id: Uuid,
    catalog: Arc<Catalog>,
    expiry_policy: ExpiryPolicy,
    state: SessionState,
    location_status: LocationStatus,
    last_coordinate: Option<Coordinate>,
}

impl GeofenceSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, expiry_policy: ExpiryPolicy) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(
            session_id = %id,
            zones = catalog.zones.len(),
            offers = catalog.offers.len(),
            expiry_policy = %expiry_policy,
            "geofence session started"
        );
        Self {
            id,
            catalog,
            expiry_policy,
            state: SessionState::new(),
            location_status: LocationStatus::Unknown,
            last_coordinate: None,
        }
    }

    /// Resolves a sample and records any zone transition.
    ///
    /// A provider failure only updates [`location_status`](Self::location_status);
    /// the current zone and history are left as they were.
    pub fn handle_sample(&mut self, sample: LocationSample) -> SessionUpdate {
        let events = match sample {
            Ok(coordinate) => {
                self.location_status = LocationStatus::Available;
                self.last_coordinate = Some(coordinate);
                let zone = resolve_zone(&coordinate, &self.catalog.zones);
                let events = self.state.on_zone_resolved(zone);
                for event in &events {
                    tracing::info!(session_id = %self.id, ?event, "zone transition");
                }
                events
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "location sample unavailable");
                self.location_status = err.into();
                Vec::new()
            }
        };

        SessionUpdate {
            location_status: self.location_status,
            current_zone_id: self.state.current_zone_id().map(str::to_owned),
            events,
        }
    }

    /// Claims an offer from the catalog. Unknown offer ids are rejected without
    /// touching the ledger.
    pub fn claim(&mut self, offer_id: &str) -> ClaimOutcome {
        if self.catalog.offer(offer_id).is_none() {
            tracing::warn!(session_id = %self.id, offer_id, "claim rejected: unknown offer");
            return ClaimOutcome::UnknownOffer {
                offer_id: offer_id.to_string(),
            };
        }
        self.state.claim_ledger_mut().claim(offer_id)
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.catalog.zones
    }

    #[must_use]
    pub fn location_status(&self) -> LocationStatus {
        self.location_status
    }

    #[must_use]
    pub fn last_coordinate(&self) -> Option<Coordinate> {
        self.last_coordinate
    }

    #[must_use]
    pub fn current_zone(&self) -> Option<&Zone> {
        self.state
            .current_zone_id()
            .and_then(|id| self.catalog.zone(id))
    }

    #[must_use]
    pub fn is_in_geofence(&self) -> bool {
        self.state.current_zone_id().is_some()
    }

    #[must_use]
    pub fn visited_zone_ids(&self) -> &[String] {
        self.state.visited_zone_ids()
    }

    /// Offers available in the current zone today. Empty outside every zone.
    #[must_use]
    pub fn available_offers(&self) -> Vec<&Offer> {
        self.available_offers_on(Utc::now().date_naive())
    }

    #[must_use]
    pub fn available_offers_on(&self, today: NaiveDate) -> Vec<&Offer> {
        match self.state.current_zone_id() {
            Some(zone_id) => {
                available_offers(zone_id, &self.catalog.offers, self.expiry_policy, today)
            }
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn offers_by_category(&self, category: OfferCategory) -> Vec<&Offer> {
        offers_by_category(&self.available_offers(), category)
    }

    #[must_use]
    pub fn is_claimed(&self, offer_id: &str) -> bool {
        self.state.claim_ledger().is_claimed(offer_id)
    }

    /// Claims, most recent first.
    #[must_use]
    pub fn claimed_offers(&self) -> Vec<&ClaimRecord> {
        self.state.claim_ledger().claimed_offers()
    }

    #[must_use]
    pub fn claimed_offers_by_category(&self, category: OfferCategory) -> Vec<&ClaimRecord> {
        self.claimed_offers()
            .into_iter()
            .filter(|record| {
                self.catalog
                    .offer(&record.offer_id)
                    .is_some_and(|offer| offer.category == category)
            })
            .collect()
    }

    #[must_use]
    pub fn total_claimed(&self) -> usize {
        self.state.claim_ledger().len()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
