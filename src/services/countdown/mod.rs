mod clock;
mod engine;
mod format;
mod timer_map;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::OfferCountdownEngine;
pub use format::{format_optional, format_remaining, EXPIRED_LABEL};
pub use timer_map::{TickOutcome, TimerMap};
