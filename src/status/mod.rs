//! Status-page lookups (`/api/v2/status.json`).

mod client;
mod types;

pub use client::{LookupError, StatusClient};
pub use types::{Indicator, Page, Status, StatusResponse};
