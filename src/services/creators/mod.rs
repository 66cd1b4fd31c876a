//! Ranking and search for the creators listing.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::creator::Creator;

const THIS_WEEK_LIMIT: usize = 4;

/// Filter tabs above the creators grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatorTab {
    ThisWeek,
    Trending,
    #[default]
    AllTime,
    TopRated,
}

impl CreatorTab {
    pub fn label(self) -> &'static str {
        match self {
            CreatorTab::ThisWeek => "This Week",
            CreatorTab::Trending => "Top Trending",
            CreatorTab::AllTime => "All Time",
            CreatorTab::TopRated => "Top Rated",
        }
    }
}

impl FromStr for CreatorTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "this-week" => Ok(CreatorTab::ThisWeek),
            "trending" => Ok(CreatorTab::Trending),
            "all-time" => Ok(CreatorTab::AllTime),
            "top-rated" => Ok(CreatorTab::TopRated),
            other => Err(format!("unknown creators tab '{}'", other)),
        }
    }
}

/// Apply a tab, then a case-insensitive search over name and category.
pub fn rank_creators(creators: &[Creator], tab: CreatorTab, search: &str) -> Vec<Creator> {
    let mut ranked: Vec<Creator> = match tab {
        CreatorTab::ThisWeek => creators.iter().take(THIS_WEEK_LIMIT).cloned().collect(),
        _ => creators.to_vec(),
    };

    match tab {
        CreatorTab::Trending => ranked.sort_by(|a, b| b.collaborations.cmp(&a.collaborations)),
        CreatorTab::TopRated => ranked.sort_by(|a, b| {
            b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
        }),
        CreatorTab::ThisWeek | CreatorTab::AllTime => {}
    }

    let needle = search.trim().to_lowercase();
    if !needle.is_empty() {
        ranked.retain(|creator| creator.matches(&needle));
    }

    ranked
}
