//! Geofencing engine: zone resolution, offer derivation, visit tracking, and
//! the claim ledger, tied together by a session-scoped controller.

pub mod ledger;
pub mod location;
pub mod query;
pub mod resolver;
pub mod session;
pub mod state;

pub use ledger::{ClaimLedger, ClaimOutcome, ClaimRecord};
pub use location::{LocationError, LocationSample, LocationStatus};
pub use query::{category_counts, offers_by_category, OfferQuery, OfferSort};
pub use resolver::{available_offers, offers_for_zone, resolve_zone};
pub use session::{GeofenceSession, SessionUpdate};
pub use state::{SessionState, ZoneEvent};
