//! Creator profiles listed on the creators page.
//!
//! The backend returns partially filled records; [`Creator::from_record`]
//! fills in the same defaults the listing has always shown.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "Content Creator";
pub const DEFAULT_RATING: f64 = 4.0;
pub const DEFAULT_PHONE: &str = "+91 XXXXX XXXXX";
pub const DEFAULT_EMAIL: &str = "contact@creator.com";

/// Social handles; `None` when the creator has no such profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub instagram: Option<String>,
    pub youtube: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl Social {
    /// Profile URLs for the handles that are set, in display order.
    pub fn links(&self) -> Vec<(&'static str, String)> {
        let mut links = Vec::new();
        if let Some(handle) = &self.instagram {
            links.push(("Instagram", format!("https://instagram.com/{}", strip_at(handle))));
        }
        if let Some(handle) = &self.youtube {
            links.push(("YouTube", format!("https://youtube.com/{}", handle)));
        }
        if let Some(handle) = &self.twitter {
            links.push(("Twitter", format!("https://twitter.com/{}", strip_at(handle))));
        }
        if let Some(handle) = &self.linkedin {
            links.push(("LinkedIn", format!("https://linkedin.com/in/{}", handle)));
        }
        links
    }
}

fn strip_at(handle: &str) -> &str {
    handle.strip_prefix('@').unwrap_or(handle)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub collaborations: u32,
    pub phone: String,
    pub email: String,
    pub social: Social,
}

impl Creator {
    /// Normalize a raw backend record.
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: text(record.get("_id")).unwrap_or_default(),
            name: text(record.get("creatorName")).unwrap_or_default(),
            image: text(record.get("creatorImage")).unwrap_or_default(),
            category: non_empty(record.get("category"))
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            rating: number(record.get("rating")).unwrap_or(DEFAULT_RATING),
            collaborations: number(record.get("collaborations"))
                .map(|count| count.max(0.0) as u32)
                .unwrap_or(0),
            phone: non_empty(record.get("phone")).unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            email: non_empty(record.get("email")).unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            social: Social {
                instagram: non_empty(record.get("instagram")),
                youtube: non_empty(record.get("youtube")),
                tiktok: non_empty(record.get("tiktok")),
                twitter: non_empty(record.get("twitter")),
                linkedin: non_empty(record.get("linkedin")),
            },
        }
    }

    /// Case-insensitive match on name or category.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    text(value).filter(|text| !text.trim().is_empty())
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fills_defaults_for_sparse_records() {
        let creator = Creator::from_record(&json!({
            "_id": "c1",
            "creatorName": "Asha",
            "creatorImage": "/asha.jpg",
            "instagram": ""
        }));

        assert_eq!(creator.category, DEFAULT_CATEGORY);
        assert_eq!(creator.rating, DEFAULT_RATING);
        assert_eq!(creator.collaborations, 0);
        assert_eq!(creator.phone, DEFAULT_PHONE);
        assert_eq!(creator.email, DEFAULT_EMAIL);
        assert_eq!(creator.social, Social::default());
    }

    #[test]
    fn keeps_explicit_zero_rating() {
        let creator = Creator::from_record(&json!({"_id": 9, "rating": 0, "collaborations": "12"}));
        assert_eq!(creator.id, "9");
        assert_eq!(creator.rating, 0.0);
        assert_eq!(creator.collaborations, 12);
    }

    #[test]
    fn social_links_strip_at_prefix() {
        let social = Social {
            instagram: Some("@asha".into()),
            twitter: Some("@asha_t".into()),
            linkedin: Some("asha-k".into()),
            ..Social::default()
        };

        assert_eq!(
            social.links(),
            vec![
                ("Instagram", "https://instagram.com/asha".to_string()),
                ("Twitter", "https://twitter.com/asha_t".to_string()),
                ("LinkedIn", "https://linkedin.com/in/asha-k".to_string()),
            ]
        );
    }
}
