//! Live per-offer countdown.
//!
//! The engine owns a [`TimerMap`] published through a `watch` channel and at
//! most one ticker task. [`OfferCountdownEngine::reset`] is the only way to
//! feed it offers: it cancels the running ticker, rebuilds the map from
//! scratch and arms a fresh ticker. The ticker decrements the map once per
//! period and stops itself after the tick that leaves every entry at zero.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::clock::{Clock, SystemClock};
use super::format::format_optional;
use super::timer_map::TimerMap;
use crate::models::offer::{Offer, OfferId};
use crate::models::settings::CountdownConfig;

pub struct OfferCountdownEngine {
    clock: Arc<dyn Clock>,
    tick_period: Duration,
    timers: Arc<watch::Sender<TimerMap>>,
    ticker: Option<JoinHandle<()>>,
    epoch: u64,
}

impl Default for OfferCountdownEngine {
    fn default() -> Self {
        Self::new(&CountdownConfig::default())
    }
}

impl OfferCountdownEngine {
    pub fn new(config: &CountdownConfig) -> Self {
        Self::with_clock(Arc::new(SystemClock), config.tick_period())
    }

    pub fn with_clock(clock: Arc<dyn Clock>, tick_period: Duration) -> Self {
        let (timers, _) = watch::channel(TimerMap::default());
        Self {
            clock,
            tick_period,
            timers: Arc::new(timers),
            ticker: None,
            epoch: 0,
        }
    }

    /// Rebuild the countdown for a new offer collection.
    ///
    /// `None` means no collection is available: the ticker is cancelled and
    /// the map emptied. Must be called from inside a tokio runtime for the
    /// ticker to start.
    pub fn reset(&mut self, offers: Option<&[Offer]>) {
        self.cancel_ticker();
        self.epoch += 1;

        let Some(offers) = offers else {
            self.timers
                .send_replace(TimerMap::default().with_epoch(self.epoch));
            log::debug!("Countdown reset without offers; engine idle");
            return;
        };

        let map = TimerMap::from_offers(offers, self.clock.now()).with_epoch(self.epoch);
        log::info!(
            "Countdown initialised: offers={}, timed={}, running={}",
            offers.len(),
            map.len(),
            map.iter().filter(|(_, remaining)| *remaining > 0).count()
        );
        self.timers.send_replace(map);

        match Handle::try_current() {
            Ok(handle) => {
                self.ticker = Some(handle.spawn(run_ticker(
                    Arc::clone(&self.timers),
                    self.tick_period,
                    self.epoch,
                )));
            }
            Err(err) => {
                log::error!("Countdown ticker not started, no async runtime: {}", err);
            }
        }
    }

    /// Cancel the ticker. The last published values stay readable.
    pub fn shutdown(&mut self) {
        if self.cancel_ticker() {
            log::debug!("Countdown ticker cancelled on shutdown");
        }
    }

    fn cancel_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a ticker is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn remaining(&self, id: &OfferId) -> Option<u64> {
        self.timers.borrow().remaining(id)
    }

    /// Formatted label for an offer; offers without an entry read as expired.
    pub fn display(&self, id: &OfferId) -> String {
        format_optional(self.remaining(id))
    }

    pub fn snapshot(&self) -> TimerMap {
        self.timers.borrow().clone()
    }

    /// Receiver notified after every reset and every tick that changed a value.
    pub fn subscribe(&self) -> watch::Receiver<TimerMap> {
        self.timers.subscribe()
    }
}

impl Drop for OfferCountdownEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

async fn run_ticker(timers: Arc<watch::Sender<TimerMap>>, period: Duration, epoch: u64) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let mut finished = false;
        timers.send_if_modified(|map| {
            // A reset raced this wake-up; the map belongs to a newer ticker.
            if map.epoch() != epoch {
                finished = true;
                return false;
            }
            let outcome = map.tick();
            finished = outcome.all_expired;
            outcome.decremented > 0
        });

        if finished {
            log::debug!("Countdown ticker {} finished", epoch);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::countdown::clock::MockClock;
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

    const PERIOD: Duration = Duration::from_secs(1);

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
    }

    fn offer(id: i64, secs: i64) -> Offer {
        Offer::new(id, Some(&(start() + ChronoDuration::seconds(secs)).to_rfc3339()))
    }

    fn engine_reading_clock_once() -> OfferCountdownEngine {
        let mut clock = MockClock::new();
        clock.expect_now().times(1).return_const(start());
        OfferCountdownEngine::with_clock(Arc::new(clock), PERIOD)
    }

    #[tokio::test(start_paused = true)]
    async fn reset_reads_the_clock_once_and_starts_ticking() {
        let mut engine = engine_reading_clock_once();
        let offers = vec![offer(1, 3)];
        engine.reset(Some(offers.as_slice()));

        assert_eq!(engine.remaining(&OfferId::Int(1)), Some(3));
        assert!(engine.is_ticking());

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.remaining(&OfferId::Int(1)), Some(2));
        assert_eq!(engine.display(&OfferId::Int(1)), "0m 2s");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_without_offers_is_idle() {
        let mut clock = MockClock::new();
        clock.expect_now().never();
        let mut engine = OfferCountdownEngine::with_clock(Arc::new(clock), PERIOD);

        engine.reset(None);
        assert!(!engine.is_ticking());
        assert!(engine.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_freezes_values() {
        let mut engine = engine_reading_clock_once();
        let offers = vec![offer(1, 100)];
        engine.reset(Some(offers.as_slice()));

        time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(engine.remaining(&OfferId::Int(1)), Some(98));

        engine.shutdown();
        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.remaining(&OfferId::Int(1)), Some(98));
        assert!(!engine.is_ticking());
    }

    #[test]
    fn reset_outside_runtime_still_initialises() {
        let mut engine = engine_reading_clock_once();
        let offers = vec![offer(4, 60)];
        engine.reset(Some(offers.as_slice()));
        assert_eq!(engine.remaining(&OfferId::Int(4)), Some(60));
        assert!(!engine.is_ticking());
    }
}
