//! Membership tiers, paid add-on services and the launch-promotion clock.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Listing tiers a business can buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Hero,
    Champion,
}

impl Tier {
    pub const ALL: [Tier; 2] = [Tier::Hero, Tier::Champion];

    /// List price in rupees.
    pub fn original_price(self) -> u32 {
        match self {
            Tier::Hero => 999,
            Tier::Champion => 2499,
        }
    }

    /// Launch price in rupees.
    pub fn discounted_price(self) -> u32 {
        match self {
            Tier::Hero => 399,
            Tier::Champion => 999,
        }
    }

    /// Saving as a whole percentage, rounded to nearest.
    pub fn discount_percent(self) -> u32 {
        let original = f64::from(self.original_price());
        let saved = original - f64::from(self.discounted_price());
        (saved / original * 100.0).round() as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Hero => "Hero",
            Tier::Champion => "Champion",
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hero" => Ok(Tier::Hero),
            "champion" => Ok(Tier::Champion),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Optional services sold alongside a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AddOn {
    BannerDesign,
    ExtraImageSlots,
    ReviewManagement,
    FeaturedBoost,
}

impl AddOn {
    pub const ALL: [AddOn; 4] = [
        AddOn::BannerDesign,
        AddOn::ExtraImageSlots,
        AddOn::ReviewManagement,
        AddOn::FeaturedBoost,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AddOn::BannerDesign => "Professional Banner Design",
            AddOn::ExtraImageSlots => "Additional Image Slots",
            AddOn::ReviewManagement => "Review Management",
            AddOn::FeaturedBoost => "Featured Listing Boost",
        }
    }

    pub fn price(self) -> u32 {
        match self {
            AddOn::BannerDesign => 499,
            AddOn::ExtraImageSlots => 199,
            AddOn::ReviewManagement => 799,
            AddOn::FeaturedBoost => 299,
        }
    }

    /// Look up an add-on by its display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|addon| addon.name().eq_ignore_ascii_case(name))
    }
}

/// What the user is about to buy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseSummary {
    pub tier: Option<Tier>,
    pub services: Vec<&'static str>,
    pub total: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MembershipCart {
    tier: Option<Tier>,
    addons: BTreeSet<AddOn>,
}

impl MembershipCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tier(&mut self, tier: Option<Tier>) {
        self.tier = tier;
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// Flip an add-on on or off. Returns whether it is now selected.
    pub fn toggle(&mut self, addon: AddOn) -> bool {
        if self.addons.remove(&addon) {
            false
        } else {
            self.addons.insert(addon);
            true
        }
    }

    pub fn is_selected(&self, addon: AddOn) -> bool {
        self.addons.contains(&addon)
    }

    /// Discounted tier price plus every selected add-on.
    pub fn total(&self) -> u32 {
        let tier = self.tier.map(Tier::discounted_price).unwrap_or(0);
        tier + self.addons.iter().map(|addon| addon.price()).sum::<u32>()
    }

    pub fn purchase(&self) -> PurchaseSummary {
        let summary = PurchaseSummary {
            tier: self.tier,
            services: self.addons.iter().map(|addon| addon.name()).collect(),
            total: self.total(),
        };
        log::info!(
            "Membership purchase: tier={:?}, services={}, total={}",
            summary.tier,
            summary.services.len(),
            summary.total
        );
        summary
    }
}

/// Hours/minutes/seconds promotion countdown, ticked once per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoClock {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl Default for PromoClock {
    fn default() -> Self {
        Self::new(19, 45, 30)
    }
}

impl PromoClock {
    /// Minutes and seconds above 59 are carried into the larger unit.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::from_total_seconds(
            u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds),
        )
    }

    fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: (total / 3600).min(u64::from(u32::MAX)) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    pub fn is_finished(&self) -> bool {
        self.total_seconds() == 0
    }

    /// Advance one second. Returns `false` once the clock rests at zero.
    pub fn tick(&mut self) -> bool {
        let total = self.total_seconds();
        if total == 0 {
            return false;
        }
        *self = Self::from_total_seconds(total - 1);
        true
    }

    /// Long form used in the purchase bar, e.g. `19h 45m 30s`.
    pub fn long_label(&self) -> String {
        format!("{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for PromoClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
