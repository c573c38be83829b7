//! Catalog search for storemap.
//!
//! Covers the full request lifecycle: building a percent-encoded query URL
//! from free text and a category filter, keeping at most one request in
//! flight (newer searches supersede and cancel older ones), parsing the JSON
//! response into typed results, and reconciling the session state the
//! presentation layer renders.

pub mod coordinator;
pub mod error;
pub mod parse;
pub mod transport;
pub mod types;

pub use coordinator::{PendingSearch, SearchCompletion, SearchCoordinator};
pub use error::TransportError;
pub use reqwest::Url;
pub use transport::{HttpTransport, Transport};
pub use types::{Category, SearchResult, SearchSession, SearchStatus};
