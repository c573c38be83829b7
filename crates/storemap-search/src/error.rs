use thiserror::Error;

/// Failures surfaced by the search transport.
///
/// Cancellation is not represented here: a superseded request is reported
/// through the completion path and swallowed, never as an error.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
