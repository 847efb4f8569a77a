use serde::{Deserialize, Serialize};

use crate::models::{FeedbackRecord, Rating, RatingTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierShare {
    pub count: usize,
    /// 0.0 to 100.0; 0.0 for an empty collection
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMetrics {
    pub total: usize,
    /// `None` when there are no submissions.
    pub average_rating: Option<f64>,
    /// rating ≥ 4
    pub positive: TierShare,
    /// rating ≤ 2
    pub negative: TierShare,
    /// One bucket per rating 1..=5, zero counts included.
    pub distribution: Vec<RatingBucket>,
}

pub fn compute_metrics(records: &[FeedbackRecord]) -> FeedbackMetrics {
    let total = records.len();

    let mut counts = [0usize; Rating::MAX as usize];
    let mut rating_sum = 0u64;
    for record in records {
        counts[usize::from(record.rating.value() - 1)] += 1;
        rating_sum += u64::from(record.rating.value());
    }

    let tier_count = |tier: RatingTier| {
        records
            .iter()
            .filter(|r| r.rating.tier() == tier)
            .count()
    };

    let average_rating = (total > 0).then(|| rating_sum as f64 / total as f64);

    FeedbackMetrics {
        total,
        average_rating,
        positive: share(tier_count(RatingTier::Positive), total),
        negative: share(tier_count(RatingTier::Negative), total),
        distribution: Rating::all()
            .map(|r| RatingBucket {
                rating: r.value(),
                count: counts[usize::from(r.value() - 1)],
            })
            .collect(),
    }
}

fn share(count: usize, total: usize) -> TierShare {
    let percent = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };
    TierShare { count, percent }
}
