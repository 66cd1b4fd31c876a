//! The offers view: current offer collection plus its countdown engine.
//!
//! A board owns exactly one [`OfferCountdownEngine`]. Replacing the offers
//! resets the engine; dropping the board cancels its ticker.

mod cards;

pub use cards::{directions_url, OfferAction, OfferCard, OfferDetail, DETAILS_FALLBACK, NOT_AVAILABLE};

use anyhow::{anyhow, Context, Result};

use crate::models::offer::{Offer, OfferId, OfferKind};
use crate::services::api::{ApiClient, ApiError};
use crate::services::countdown::{format_optional, OfferCountdownEngine};

const TRENDING_LIMIT: usize = 2;
const FLASH_DEALS_LIMIT: usize = 2;

/// Offers grouped the way the home page lays them out.
#[derive(Debug, Default, PartialEq)]
pub struct OfferSections<'a> {
    pub trending: Vec<&'a Offer>,
    pub flash_deals: Vec<&'a Offer>,
    /// Third and fourth offers overall, shown large.
    pub featured: Vec<&'a Offer>,
    /// Fifth and sixth offers overall.
    pub more: Vec<&'a Offer>,
    pub events: Vec<&'a Offer>,
}

impl OfferSections<'_> {
    pub fn is_empty(&self) -> bool {
        self.trending.is_empty()
            && self.flash_deals.is_empty()
            && self.featured.is_empty()
            && self.more.is_empty()
            && self.events.is_empty()
    }
}

pub struct OfferBoard {
    offers: Option<Vec<Offer>>,
    engine: OfferCountdownEngine,
}

impl OfferBoard {
    pub fn new(engine: OfferCountdownEngine) -> Self {
        Self {
            offers: None,
            engine,
        }
    }

    /// Fetch offers and restart the countdown. Returns whether offers arrived.
    pub async fn load(&mut self, api: &ApiClient) -> bool {
        let result = api.fetch_offers().await;
        self.apply_fetch(result)
    }

    /// A failed fetch leaves the board without offers and the engine idle.
    pub fn apply_fetch(&mut self, result: Result<Vec<Offer>, ApiError>) -> bool {
        match result {
            Ok(offers) => {
                self.replace_offers(Some(offers));
                true
            }
            Err(err) => {
                log::warn!("Offer fetch failed, showing no countdowns: {}", err);
                self.replace_offers(None);
                false
            }
        }
    }

    pub fn replace_offers(&mut self, offers: Option<Vec<Offer>>) {
        self.offers = offers;
        self.engine.reset(self.offers.as_deref());
    }

    pub fn offers(&self) -> &[Offer] {
        self.offers.as_deref().unwrap_or_default()
    }

    /// Nothing is rendered for a missing or empty collection.
    pub fn is_visible(&self) -> bool {
        !self.offers().is_empty()
    }

    pub fn engine(&self) -> &OfferCountdownEngine {
        &self.engine
    }

    pub fn sections(&self) -> OfferSections<'_> {
        let offers = self.offers();
        let of_kind = |kind: OfferKind, limit: usize| {
            offers
                .iter()
                .filter(|offer| offer.kind() == kind)
                .take(limit)
                .collect::<Vec<_>>()
        };

        OfferSections {
            trending: of_kind(OfferKind::Trending, TRENDING_LIMIT),
            flash_deals: of_kind(OfferKind::Hot, FLASH_DEALS_LIMIT),
            featured: offers.iter().skip(2).take(2).collect(),
            more: offers.iter().skip(4).take(2).collect(),
            events: of_kind(OfferKind::Event, usize::MAX),
        }
    }

    pub fn find(&self, id: &OfferId) -> Option<&Offer> {
        self.offers().iter().find(|offer| offer.key() == Some(id))
    }

    pub fn timer_label(&self, offer: &Offer) -> String {
        format_optional(offer.key().and_then(|id| self.engine.remaining(id)))
    }

    pub fn card(&self, offer: &Offer) -> OfferCard {
        OfferCard::new(offer, self.timer_label(offer))
    }

    pub fn detail(&self, id: &OfferId) -> Option<OfferDetail> {
        self.find(id)
            .map(|offer| OfferDetail::new(offer, self.timer_label(offer)))
    }

    /// Open directions to a physical store in the system browser.
    pub fn open_directions(&self, id: &OfferId) -> Result<String> {
        let detail = self
            .detail(id)
            .ok_or_else(|| anyhow!("No offer with id {}", id))?;

        let url = match detail.action {
            OfferAction::GetDirections(Some(url)) => url,
            OfferAction::GetDirections(None) => {
                return Err(anyhow!("Offer {} has no address", id));
            }
            OfferAction::VisitWebsite(Some(url)) => url,
            OfferAction::VisitWebsite(None) => {
                return Err(anyhow!("Offer {} is online-only and has no website", id));
            }
        };

        webbrowser::open(&url).with_context(|| format!("Failed to open browser for {}", url))?;
        Ok(url)
    }
}

impl Drop for OfferBoard {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}
