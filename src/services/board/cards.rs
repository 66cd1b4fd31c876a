//! View models handed to the renderer.
//!
//! Cards and details carry already-formatted strings so the renderer never
//! touches the countdown engine or raw offer fields.

use chrono::Local;

use crate::models::offer::{EndTimestamp, Offer, OfferId};

pub const DETAILS_FALLBACK: &str = "More details about this offer will be available soon.";
pub const NOT_AVAILABLE: &str = "N/A";

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Google Maps directions to a free-form address.
pub fn directions_url(address: &str) -> String {
    format!("{}{}", DIRECTIONS_BASE, urlencoding::encode(address.trim()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferCard {
    pub id: Option<OfferId>,
    pub name: String,
    pub description: Option<String>,
    pub store: Option<String>,
    pub price: Option<String>,
    pub image: String,
    pub timer: String,
}

impl OfferCard {
    pub fn new(offer: &Offer, timer: String) -> Self {
        Self {
            id: offer.key().cloned(),
            name: offer.display_name().to_string(),
            description: offer.description_text().map(str::to_string),
            store: offer.store_label().map(str::to_string),
            price: offer.offer_price.as_deref().map(|price| format!("₹ {}", price)),
            image: offer.image_or_placeholder().to_string(),
            timer,
        }
    }
}

/// Primary action offered in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferAction {
    /// Online offers link to the store's website, when it has one.
    VisitWebsite(Option<String>),
    /// Physical stores get directions, when an address is known.
    GetDirections(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferDetail {
    pub card: OfferCard,
    pub price: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub category: Option<String>,
    pub valid_until: String,
    pub details: String,
    pub action: OfferAction,
}

impl OfferDetail {
    pub fn new(offer: &Offer, timer: String) -> Self {
        let valid_until = match offer.end_timestamp() {
            EndTimestamp::At(end) => end.with_timezone(&Local).format("%d/%m/%Y").to_string(),
            EndTimestamp::Missing | EndTimestamp::Invalid => NOT_AVAILABLE.to_string(),
        };

        let action = if offer.is_online.unwrap_or(false) {
            OfferAction::VisitWebsite(non_blank(offer.website.as_deref()))
        } else {
            OfferAction::GetDirections(non_blank(offer.address.as_deref()).map(|a| directions_url(&a)))
        };

        Self {
            card: OfferCard::new(offer, timer),
            price: offer.offer_price.as_deref().map(|price| format!("₹{}", price)),
            location: non_blank(offer.location.as_deref()),
            contact: non_blank(offer.contact.as_deref()),
            category: non_blank(offer.business_category.as_deref()),
            valid_until,
            details: offer
                .description_text()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(DETAILS_FALLBACK)
                .to_string(),
            action,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directions_url_encodes_address() {
        assert_eq!(
            directions_url("12/4 Mall Road, Kanpur"),
            "https://www.google.com/maps/dir/?api=1&destination=12%2F4%20Mall%20Road%2C%20Kanpur"
        );
    }

    #[test]
    fn card_formats_price_and_fallbacks() {
        let mut offer = Offer::new(5, None);
        offer.offer_price = Some("249".into());
        offer.store = Some("Legacy Store".into());

        let card = OfferCard::new(&offer, "Expired".into());
        assert_eq!(card.price.as_deref(), Some("₹ 249"));
        assert_eq!(card.store.as_deref(), Some("Legacy Store"));
        assert_eq!(card.name, "Offer");
        assert_eq!(card.timer, "Expired");
    }

    #[test]
    fn detail_for_online_offer_links_website() {
        let mut offer = Offer::new(1, Some("not a date"));
        offer.is_online = Some(true);
        offer.website = Some("https://shop.example".into());

        let detail = OfferDetail::new(&offer, "Expired".into());
        assert_eq!(detail.action, OfferAction::VisitWebsite(Some("https://shop.example".into())));
        assert_eq!(detail.valid_until, NOT_AVAILABLE);
        assert_eq!(detail.details, DETAILS_FALLBACK);
    }

    #[test]
    fn detail_for_store_offers_directions() {
        let mut offer = Offer::new(2, Some("2025-07-01T10:00:00Z"));
        offer.address = Some("Z Square Mall".into());
        offer.offer_description = Some("Flat 20% off".into());

        let detail = OfferDetail::new(&offer, "1d 0h".into());
        assert_eq!(
            detail.action,
            OfferAction::GetDirections(Some(directions_url("Z Square Mall")))
        );
        assert_eq!(detail.details, "Flat 20% off");
        assert_ne!(detail.valid_until, NOT_AVAILABLE);
    }
}
