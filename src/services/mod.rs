//! Resource services for the ChartMogul API.
//!
//! Each service is a thin typed layer over the client's six generic
//! operations: it owns the endpoint templates and payload shapes for one
//! resource and nothing else.

pub mod account;
pub mod attributes;
pub mod csv_uploads;
pub mod customers;
pub mod data_sources;
pub mod invoices;
pub mod metrics;
pub mod ping;
pub mod plans;
pub mod subscriptions;
pub mod tags;
pub mod transactions;

pub use account::*;
pub use attributes::*;
pub use csv_uploads::*;
pub use customers::*;
pub use data_sources::*;
pub use invoices::*;
pub use metrics::*;
pub use ping::*;
pub use plans::*;
pub use subscriptions::*;
pub use tags::*;
pub use transactions::*;

use serde::Serialize;

/// Paging parameters accepted by list operations.
///
/// Passed through to the query string as-is; the client keeps no paging
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl Cursor {
    /// Creates a cursor for a page with the given size.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }
}
