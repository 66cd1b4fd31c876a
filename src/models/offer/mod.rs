//! Offer records as served by the marketplace backend.
//!
//! The backend hands out loosely-typed JSON: every field except the
//! identifier may be missing, and the identifier itself is a number on some
//! deployments and a string (Mongo object id) on others.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::utils::date::parse_timestamp;

/// Image shown when an offer has none.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Opaque offer key. Only equality and hashing matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfferId {
    Int(i64),
    Text(String),
}

impl OfferId {
    /// Identifiers the backend sends as empty strings are treated as absent.
    pub fn is_blank(&self) -> bool {
        matches!(self, OfferId::Text(text) if text.trim().is_empty())
    }

    /// Parse a user-supplied identifier, preferring the integer form.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<i64>()
            .map(OfferId::Int)
            .unwrap_or_else(|_| OfferId::Text(raw.to_string()))
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferId::Int(value) => write!(f, "{}", value),
            OfferId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for OfferId {
    fn from(value: i64) -> Self {
        OfferId::Int(value)
    }
}

impl From<&str> for OfferId {
    fn from(value: &str) -> Self {
        OfferId::Text(value.to_string())
    }
}

/// Section an offer is promoted in, taken from the `offerType` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferKind {
    Trending,
    Hot,
    Event,
    Other(String),
}

impl OfferKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("trending") => OfferKind::Trending,
            Some("hot") => OfferKind::Hot,
            Some("event") => OfferKind::Event,
            Some(other) => OfferKind::Other(other.to_string()),
            None => OfferKind::Other(String::new()),
        }
    }
}

/// State of an offer's end timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTimestamp {
    /// No end date at all (or a blank one).
    Missing,
    /// An end date is present but cannot be read as a point in time.
    Invalid,
    At(DateTime<Utc>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Offer {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<OfferId>,
    pub title: Option<String>,
    pub store: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub offer_image: Option<String>,
    pub offer_name: Option<String>,
    pub offer_type: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub offer_price: Option<String>,
    pub store_name: Option<String>,
    pub offer_start_date: Option<String>,
    pub offer_end_date: Option<String>,
    pub offer_description: Option<String>,
    pub business_category: Option<String>,
    pub is_online: Option<bool>,
    pub website: Option<String>,
    pub address: Option<String>,
}

/// Prices arrive as strings from some backends and as numbers from others.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

impl Offer {
    /// Create a bare offer with only an identifier and end date.
    pub fn new(id: impl Into<OfferId>, offer_end_date: Option<&str>) -> Self {
        Self {
            id: Some(id.into()),
            offer_end_date: offer_end_date.map(str::to_string),
            ..Self::default()
        }
    }

    /// Identifier usable as a timer key, if any.
    pub fn key(&self) -> Option<&OfferId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }

    pub fn kind(&self) -> OfferKind {
        OfferKind::from_tag(self.offer_type.as_deref())
    }

    pub fn end_timestamp(&self) -> EndTimestamp {
        match self.offer_end_date.as_deref().map(str::trim) {
            None | Some("") => EndTimestamp::Missing,
            Some(raw) => parse_timestamp(raw)
                .map(EndTimestamp::At)
                .unwrap_or(EndTimestamp::Invalid),
        }
    }

    pub fn display_name(&self) -> &str {
        self.offer_name
            .as_deref()
            .or(self.title.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Offer")
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.offer_image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Store name, falling back to the legacy `store` field.
    pub fn store_label(&self) -> Option<&str> {
        self.store_name.as_deref().or(self.store.as_deref())
    }

    pub fn description_text(&self) -> Option<&str> {
        self.offer_description
            .as_deref()
            .or(self.description.as_deref())
    }
}
