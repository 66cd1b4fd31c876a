// Test fixtures - reusable test data
// Offers anchored to a fixed instant so countdown values are exact

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use offerboard::models::offer::Offer;
use offerboard::services::countdown::{FixedClock, OfferCountdownEngine};

pub const TICK: Duration = Duration::from_secs(1);

/// May 1, 2025 at 09:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
}

/// Offer whose end date lies `seconds` after [`now`].
pub fn offer_ending_in(id: i64, seconds: i64) -> Offer {
    let end = now() + ChronoDuration::seconds(seconds);
    Offer::new(id, Some(&end.to_rfc3339()))
}

/// Offer keyed by a string id, as Mongo-backed deployments send them.
pub fn text_offer_ending_in(id: &str, seconds: i64) -> Offer {
    let end = now() + ChronoDuration::seconds(seconds);
    Offer::new(id, Some(&end.to_rfc3339()))
}

pub fn engine() -> OfferCountdownEngine {
    OfferCountdownEngine::with_clock(Arc::new(FixedClock(now())), TICK)
}

/// Sleep a whole number of ticks plus half a tick, so the paused clock
/// lands between two deadlines.
pub async fn after_ticks(ticks: u32) {
    tokio::time::sleep(TICK * ticks + TICK / 2).await;
}

/// The JSON payload `/getOffer` returns on a typical day.
pub fn offers_payload() -> &'static str {
    r#"[
        {"_id": 1, "offerName": "Paneer Combo", "offerType": "trending", "offerPrice": "149",
         "storeName": "Kanpur Kitchen", "offerEndDate": "2099-01-01T00:00:00Z",
         "address": "Mall Road, Kanpur", "isOnline": false},
        {"_id": 2, "offerName": "Sneaker Drop", "offerType": "hot", "offerPrice": "1999",
         "storeName": "Kickz", "offerEndDate": "2020-01-01T00:00:00Z",
         "isOnline": true, "website": "https://kickz.example"},
        {"_id": "ev-3", "offerName": "Sunday Jam", "offerType": "event"}
    ]"#
}
