use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct InvalidRating(pub i64);

/// A star rating. Always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(InvalidRating(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> RatingTier {
        RatingTier::from(self)
    }

    /// All valid ratings in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<i64> for Rating {
    type Error = InvalidRating;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sentiment bucket derived once from a rating. Every drafting path keys on
/// this instead of comparing raw ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    /// 4 or 5 stars
    Positive,
    /// 3 stars
    Neutral,
    /// 1 or 2 stars
    Negative,
}

impl From<Rating> for RatingTier {
    fn from(rating: Rating) -> Self {
        match rating.value() {
            4..=5 => RatingTier::Positive,
            3 => RatingTier::Neutral,
            _ => RatingTier::Negative,
        }
    }
}

/// One stored submission. Field names match the on-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: u64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub rating: Rating,
    pub review: String,
    pub ai_response: String,
    pub summary: String,
    pub actions: String,
}

/// A submission that has been drafted but not yet assigned an id or timestamp.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub rating: Rating,
    pub review: String,
    pub ai_response: String,
    pub summary: String,
    pub actions: String,
}

/// Accepts RFC 3339 timestamps as well as naive ISO-8601 ones (no offset),
/// which are read as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(Rating::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn test_rating_rejects_out_of_range() {
        assert_eq!(Rating::new(0), Err(InvalidRating(0)));
        assert_eq!(Rating::new(6), Err(InvalidRating(6)));
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn test_tier_thresholds() {
        let tiers: Vec<RatingTier> = Rating::all().map(Rating::tier).collect();
        assert_eq!(
            tiers,
            vec![
                RatingTier::Negative,
                RatingTier::Negative,
                RatingTier::Neutral,
                RatingTier::Positive,
                RatingTier::Positive,
            ]
        );
    }

    #[test]
    fn test_rating_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("7").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().value(), 4);
        assert_eq!(serde_json::to_string(&Rating::new(2).unwrap()).unwrap(), "2");
    }

    #[test]
    fn test_record_reads_naive_timestamp() {
        let json = r#"{
            "id": 1,
            "timestamp": "2024-11-02T18:04:05.123456",
            "rating": 5,
            "review": "Great food and service",
            "ai_response": "Thanks!",
            "summary": "Great food and service",
            "actions": "• Thank customer personally"
        }"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-11-02T18:04:05.123456+00:00");
        assert_eq!(record.rating.tier(), RatingTier::Positive);
    }

    #[test]
    fn test_record_reads_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-11-02T20:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-11-02T18:00:00+00:00");
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
