use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::offer::{EndTimestamp, Offer, OfferId};
use crate::utils::date::whole_seconds_until;

/// Result of one decrement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Entries that moved down by one second.
    pub decremented: usize,
    /// Every entry is at zero after the pass (also true for an empty map).
    pub all_expired: bool,
}

/// Remaining whole seconds per offer.
///
/// Built from scratch for every offer collection; entries never go below
/// zero. The epoch identifies which collection the map was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerMap {
    entries: HashMap<OfferId, u64>,
    epoch: u64,
}

impl TimerMap {
    /// Initial values for `offers` as of `now`.
    ///
    /// Offers without a key or without an end date get no entry. An end date
    /// that cannot be parsed counts as already expired.
    pub fn from_offers(offers: &[Offer], now: DateTime<Utc>) -> Self {
        let mut entries = HashMap::with_capacity(offers.len());

        for offer in offers {
            let Some(id) = offer.key() else {
                continue;
            };

            let remaining = match offer.end_timestamp() {
                EndTimestamp::Missing => continue,
                EndTimestamp::Invalid => {
                    log::debug!("Offer {} has an unreadable end date, treating as expired", id);
                    0
                }
                EndTimestamp::At(end) => whole_seconds_until(end, now),
            };

            entries.insert(id.clone(), remaining);
        }

        Self { entries, epoch: 0 }
    }

    pub(crate) fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Decrement every running entry by one second, then report whether the
    /// whole map has reached zero.
    pub fn tick(&mut self) -> TickOutcome {
        let mut decremented = 0;
        for remaining in self.entries.values_mut() {
            if *remaining > 0 {
                *remaining -= 1;
                decremented += 1;
            }
        }

        TickOutcome {
            decremented,
            all_expired: self.all_expired(),
        }
    }

    pub fn all_expired(&self) -> bool {
        self.entries.values().all(|remaining| *remaining == 0)
    }

    pub fn remaining(&self, id: &OfferId) -> Option<u64> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &OfferId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OfferId, u64)> {
        self.entries.iter().map(|(id, remaining)| (id, *remaining))
    }
}
