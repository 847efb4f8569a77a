pub mod feedback;

pub use feedback::{FeedbackRecord, Rating, RatingTier};
