use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use geopromo_core::{AppConfig, Catalog, Coordinate};
use geopromo_geofence::{
    category_counts, offers_for_zone, ClaimOutcome, ClaimRecord, GeofenceSession, LocationStatus,
    OfferQuery, SessionUpdate, ZoneEvent,
};
use serde::Serialize;

use crate::replay;

pub(crate) struct ReplayOptions {
    pub samples_path: PathBuf,
    pub interval: Duration,
    pub claims: Vec<String>,
    pub json: bool,
}

pub(crate) fn run_zones(catalog: &Catalog) {
    for (i, zone) in catalog.zones.iter().enumerate() {
        let active = offers_for_zone(&zone.id, &catalog.offers).len();
        let b = &zone.bounds;
        println!(
            "{:>2}. {} [{}] N {:.4} S {:.4} E {:.4} W {:.4}, {active} active offers",
            i + 1,
            zone.name,
            zone.id,
            b.north,
            b.south,
            b.east,
            b.west,
        );
    }
}

pub(crate) fn run_resolve(
    catalog: &Catalog,
    config: &AppConfig,
    lat: f64,
    lng: f64,
    query: &OfferQuery,
) {
    let mut session = GeofenceSession::new(Arc::new(catalog.clone()), config.offer_expiry_policy);
    session.handle_sample(Ok(Coordinate::new(lat, lng, 0.0)));

    let Some(zone) = session.current_zone() else {
        println!("no zone contains ({lat}, {lng})");
        return;
    };
    println!("({lat}, {lng}) is in {} [{}]", zone.name, zone.id);

    let available = session.available_offers();
    let counts = category_counts(&available)
        .into_iter()
        .map(|(category, n)| format!("{category}: {n}"))
        .collect::<Vec<_>>();
    println!("{} offers ({})", available.len(), counts.join(", "));

    let matched = query.apply(&available);
    if matched.is_empty() {
        println!("no offers match the given filters");
    }
    for offer in matched {
        println!(
            "  #{} [{}] {} by {}: {} (until {})",
            offer.id, offer.category, offer.title, offer.brand, offer.discount, offer.valid_until
        );
    }
}

/// Replay a samples file through a fresh session, then apply the requested claims.
///
/// Ctrl-C stops the replay early; claims and the summary still run.
///
/// # Errors
///
/// Returns an error if the samples file cannot be loaded or the summary cannot
/// be serialized.
pub(crate) async fn run_replay(
    catalog: Catalog,
    config: &AppConfig,
    options: ReplayOptions,
) -> anyhow::Result<()> {
    let samples = replay::load_samples(&options.samples_path).with_context(|| {
        format!(
            "failed to load samples from {}",
            options.samples_path.display()
        )
    })?;
    let total = samples.len();

    let mut session = GeofenceSession::new(Arc::new(catalog), config.offer_expiry_policy);
    let mut rx = replay::spawn_replay(samples, options.interval);
    let mut handled: usize = 0;

    loop {
        tokio::select! {
            sample = rx.recv() => {
                let Some(sample) = sample else { break };
                handled += 1;
                let update = session.handle_sample(sample);
                print_update(handled, &update, &session);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!(handled, total, "interrupted; stopping replay");
                break;
            }
        }
    }

    for offer_id in &options.claims {
        match session.claim(offer_id) {
            ClaimOutcome::Accepted(record) => {
                println!("claimed offer {offer_id} as {}", record.claim_id);
            }
            ClaimOutcome::AlreadyClaimed { .. } => println!("offer {offer_id} already claimed"),
            ClaimOutcome::UnknownOffer { .. } => println!("offer {offer_id} does not exist"),
        }
    }

    let summary = SessionSummary::from_session(&session);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print();
    }
    Ok(())
}

fn print_update(n: usize, update: &SessionUpdate, session: &GeofenceSession) {
    if update.location_status != LocationStatus::Available {
        println!("sample {n}: no fix ({})", update.location_status);
        return;
    }

    if update.events.is_empty() {
        let zone = update.current_zone_id.as_deref().unwrap_or("outside all zones");
        println!("sample {n}: {zone}");
        return;
    }

    for event in &update.events {
        match event {
            ZoneEvent::Exited { zone_id } => println!("sample {n}: left {zone_id}"),
            ZoneEvent::Entered {
                zone_id,
                first_visit,
            } => {
                let offers = session.available_offers().len();
                let note = if *first_visit { ", first visit" } else { "" };
                println!("sample {n}: entered {zone_id} ({offers} offers nearby{note})");
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionSummary<'a> {
    session_id: String,
    location_status: LocationStatus,
    current_zone_id: Option<&'a str>,
    visited_zone_ids: &'a [String],
    available_offer_ids: Vec<&'a str>,
    claims: Vec<&'a ClaimRecord>,
}

impl<'a> SessionSummary<'a> {
    fn from_session(session: &'a GeofenceSession) -> Self {
        Self {
            session_id: session.id().to_string(),
            location_status: session.location_status(),
            current_zone_id: session.state().current_zone_id(),
            visited_zone_ids: session.visited_zone_ids(),
            available_offer_ids: session
                .available_offers()
                .into_iter()
                .map(|o| o.id.as_str())
                .collect(),
            claims: session.claimed_offers(),
        }
    }

    fn print(&self) {
        println!("session {}", self.session_id);
        println!("  location: {}", self.location_status);
        println!(
            "  current zone: {}",
            self.current_zone_id.unwrap_or("none")
        );
        println!("  visited: [{}]", self.visited_zone_ids.join(", "));
        println!("  available offers: [{}]", self.available_offer_ids.join(", "));
        println!("  claims ({}):", self.claims.len());
        for record in &self.claims {
            println!(
                "    {} offer {} at {}",
                record.claim_id,
                record.offer_id,
                record.claimed_at.to_rfc3339()
            );
        }
    }
}
