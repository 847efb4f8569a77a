// Admin view: metrics, filtered submission listing, CSV export.
// Everything here is computed from a fresh load of the store on each request.

pub mod export;
pub mod handlers;
pub mod metrics;
pub mod query;
