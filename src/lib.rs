//! # ChartMogul Integration Library
//!
//! A production-ready client for the ChartMogul billing-analytics API:
//! - Typed resource services (customers, plans, invoices, subscriptions,
//!   metrics, tags, attributes, CSV uploads, ...)
//! - Six generic operations every resource call funnels through
//! - Automatic retry with exponential backoff for rate limits, transient
//!   server errors and network failures
//! - Verbatim error-body passthrough for field-level validation feedback
//! - HTTP Basic (account token + access key) or API key authentication
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_chartmogul::{AuthMethod, ChartMogulClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChartMogulClient::builder()
//!         .auth(AuthMethod::basic("account_token", "secret_key"))
//!         .build()?;
//!
//!     let sources = client.data_sources().list().await?;
//!     for source in sources.data_sources {
//!         println!("{} ({})", source.name, source.uuid);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Retry semantics
//!
//! Requests hitting HTTP 429/500/502/503 or a network failure are retried
//! under exponential backoff until the configured attempt or wall-clock
//! budget runs out; retries are invisible to the caller except as elapsed
//! time. Create and upload are not idempotent: a retried request whose
//! first response was lost can create a duplicate remote resource, and the
//! service's duplicate detection (surfaced as field-error maps in the
//! response body) is the mitigation.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;

// Authentication
pub mod auth;

// Endpoint templates
pub mod endpoint;

// HTTP client and generic operations
pub mod client;

// Retry machinery
pub mod resilience;

// Resource services
pub mod services;

// Re-exports for convenience
pub use auth::AuthMethod;
pub use client::{ChartMogulClient, ChartMogulClientBuilder, QueryParams, UpdateVerb};
pub use config::{ChartMogulConfig, ChartMogulConfigBuilder, RetryConfig};
pub use errors::{ChartMogulError, ChartMogulResult, FieldErrors, TransportError};
pub use services::Cursor;
