//! Filtering and ordering for the submissions list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{FeedbackRecord, Rating};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Highest,
    Lowest,
}

/// Parses a comma-separated rating list such as `"1,2,5"`.
/// Empty input selects every rating.
pub fn parse_rating_filter(raw: Option<&str>) -> Result<BTreeSet<Rating>, String> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(Rating::all().collect());
    }

    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| format!("'{part}' is not a rating"))
                .and_then(|v| Rating::new(v).map_err(|e| e.to_string()))
        })
        .collect()
}

/// Returns the records whose rating is in `ratings`, ordered by `sort`.
/// The input is left untouched. Ties keep their stored order.
pub fn select(
    records: &[FeedbackRecord],
    ratings: &BTreeSet<Rating>,
    sort: SortOrder,
) -> Vec<FeedbackRecord> {
    let mut selected: Vec<FeedbackRecord> = records
        .iter()
        .filter(|r| ratings.contains(&r.rating))
        .cloned()
        .collect();

    match sort {
        SortOrder::Newest => selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Oldest => selected.sort_by_key(|r| r.timestamp),
        SortOrder::Highest => selected.sort_by(|a, b| b.rating.cmp(&a.rating)),
        SortOrder::Lowest => selected.sort_by_key(|r| r.rating),
    }
    selected
}
