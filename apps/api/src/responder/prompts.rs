// Prompt templates for the drafting calls.
// Replace `{rating}` and `{review}` before sending.

pub const REPLY_PROMPT_TEMPLATE: &str = r#"You are a professional restaurant manager responding to a customer review.

Customer gave {rating} out of 5 stars and wrote:
"{review}"

Write a professional, empathetic response (2-3 sentences only). Match the tone to the rating:
- 5-4 stars: Enthusiastic and grateful
- 3 stars: Appreciative but focused on improvement
- 2-1 stars: Sincerely apologetic and action-oriented

Response:"#;

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize this {rating}-star restaurant review in exactly 10 words or less:
"{review}"

Summary:"#;

pub const ACTIONS_PROMPT_TEMPLATE: &str = r#"Based on this {rating}-star restaurant review, list 2-3 specific action items for management.
Be brief and actionable.

Review: "{review}"

Actions:"#;

pub fn render(template: &str, rating: impl std::fmt::Display, review: &str) -> String {
    template
        .replace("{rating}", &rating.to_string())
        .replace("{review}", review)
}
