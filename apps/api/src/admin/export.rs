//! CSV export of the full collection.

use chrono::NaiveDate;

use crate::models::FeedbackRecord;

pub const CSV_HEADER: &str = "id,timestamp,rating,review,ai_response,summary,actions";

pub fn export_filename(date: NaiveDate) -> String {
    format!("feedback_{}.csv", date.format("%Y%m%d"))
}

pub fn to_csv(records: &[FeedbackRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 256);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for r in records {
        let row = [
            r.id.to_string(),
            r.timestamp.to_rfc3339(),
            r.rating.to_string(),
            escape_field(&r.review),
            escape_field(&r.ai_response),
            escape_field(&r.summary),
            escape_field(&r.actions),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// RFC 4180 quoting: wrap in quotes when the field holds a delimiter, quote
/// or line break, doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
