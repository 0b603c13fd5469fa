//! Coordinate-to-zone resolution and per-zone offer derivation.
//!
//! Every sample is resolved from scratch. There is no hysteresis, so a device
//! oscillating across a zone edge flips between zones on consecutive samples.

use chrono::NaiveDate;
use geopromo_core::{Coordinate, ExpiryPolicy, Offer, Zone};

/// Resolves `coordinate` to the zone that contains it.
///
/// Edges are inclusive. When zone rectangles overlap, the first matching zone
/// in `zones` order wins, so catalog order is the tie-break policy. Returns
/// `None` when no zone contains the coordinate.
#[must_use]
pub fn resolve_zone<'a>(coordinate: &Coordinate, zones: &'a [Zone]) -> Option<&'a Zone> {
    zones.iter().find(|zone| zone.contains(coordinate))
}

/// Returns the active offers bound to `zone_id`, in catalog order.
///
/// Only the `is_active` flag gates availability here; `valid_until` is not
/// consulted. Use [`available_offers`] to apply an [`ExpiryPolicy`].
#[must_use]
pub fn offers_for_zone<'a>(zone_id: &str, offers: &'a [Offer]) -> Vec<&'a Offer> {
    offers
        .iter()
        .filter(|offer| offer.zone_id == zone_id && offer.is_active)
        .collect()
}

/// [`offers_for_zone`] with the configured expiry policy applied as of `today`.
#[must_use]
pub fn available_offers<'a>(
    zone_id: &str,
    offers: &'a [Offer],
    policy: ExpiryPolicy,
    today: NaiveDate,
) -> Vec<&'a Offer> {
    let mut zone_offers = offers_for_zone(zone_id, offers);
    if policy == ExpiryPolicy::ExcludeExpired {
        zone_offers.retain(|offer| !offer.is_expired_on(today));
    }
    zone_offers
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
