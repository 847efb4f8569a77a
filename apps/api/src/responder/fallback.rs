//! Deterministic drafts used whenever the remote call is unavailable.

use crate::models::{Rating, RatingTier};

/// Longest fallback summary, in words.
pub const SUMMARY_WORD_LIMIT: usize = 12;
pub const TRUNCATION_MARKER: &str = "...";

pub fn reply(rating: Rating, tier: RatingTier) -> String {
    match tier {
        RatingTier::Positive => format!(
            "Thank you so much for your wonderful {rating}-star review! We're thrilled you had \
             such a great experience with us. We look forward to serving you again soon!"
        ),
        RatingTier::Neutral => format!(
            "Thank you for your {rating}-star feedback. We appreciate your honest review and will \
             work hard to improve your experience next time you visit us."
        ),
        RatingTier::Negative => format!(
            "We sincerely apologize for your {rating}-star experience. This is not the standard \
             we set for ourselves, and our manager will contact you within 24 hours to make \
             things right."
        ),
    }
}

/// First `SUMMARY_WORD_LIMIT` words of the review, marked when cut short.
pub fn summary(review: &str) -> String {
    let words: Vec<&str> = review.split_whitespace().collect();
    let mut out = words
        .iter()
        .take(SUMMARY_WORD_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if words.len() > SUMMARY_WORD_LIMIT {
        out.push_str(TRUNCATION_MARKER);
    }
    out
}

pub fn action_items(tier: RatingTier) -> &'static [&'static str] {
    match tier {
        RatingTier::Positive => &[
            "Thank customer personally",
            "Share positive feedback with team",
            "Request online review or testimonial",
        ],
        RatingTier::Neutral => &[
            "Follow up with customer within 24 hours",
            "Identify specific improvement areas",
            "Offer discount on next visit",
        ],
        RatingTier::Negative => &[
            "Contact customer immediately",
            "Offer full refund or compensation",
            "Manager review and staff training",
        ],
    }
}

/// Bulleted, newline-separated action list.
pub fn actions(tier: RatingTier) -> String {
    action_items(tier)
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
