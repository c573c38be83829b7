//! The search request lifecycle: supersede semantics, state transitions, and
//! result ordering.

use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture};
use reqwest::Url;

use crate::error::TransportError;
use crate::parse::parse_results;
use crate::transport::Transport;
use crate::types::{Category, SearchSession, SearchStatus};

/// Identity of one issued request. Monotonic per coordinator; a completion
/// carrying any other sequence number is dropped instead of applied.
type Seq = u64;

struct InFlight {
    seq: Seq,
    abort: AbortHandle,
}

/// Terminal outcome of one issued request.
#[derive(Debug)]
enum Outcome {
    /// Aborted because a newer search superseded it.
    Cancelled,
    /// The transport finished, successfully or not.
    Finished(Result<Vec<u8>, TransportError>),
}

/// Completion token produced by [`PendingSearch::wait`], fed back to
/// [`SearchCoordinator::apply`].
#[derive(Debug)]
pub struct SearchCompletion {
    seq: Seq,
    outcome: Outcome,
}

/// A search the owner must await, then hand back to the coordinator.
pub struct PendingSearch {
    seq: Seq,
    request: Abortable<BoxFuture<'static, Result<Vec<u8>, TransportError>>>,
}

impl PendingSearch {
    /// Waits for the transport to finish or for the request to be superseded.
    pub async fn wait(self) -> SearchCompletion {
        let outcome = match self.request.await {
            Err(Aborted) => Outcome::Cancelled,
            Ok(result) => Outcome::Finished(result),
        };
        SearchCompletion {
            seq: self.seq,
            outcome,
        }
    }
}

/// Drives the search state machine.
///
/// Not internally thread-safe: one logical task owns the coordinator, calls
/// [`search`](Self::search), awaits the returned [`PendingSearch`], and feeds
/// the completion back through [`apply`](Self::apply). The coordinator holds
/// no locks; cancellation happens at the transport layer and stale
/// completions are dropped by sequence-number identity.
pub struct SearchCoordinator<T> {
    transport: T,
    base_url: Url,
    result_limit: u32,
    session: SearchSession,
    next_seq: Seq,
    in_flight: Option<InFlight>,
}

impl<T: Transport> SearchCoordinator<T> {
    #[must_use]
    pub fn new(transport: T, base_url: Url, result_limit: u32) -> Self {
        Self {
            transport,
            base_url,
            result_limit,
            session: SearchSession::default(),
            next_seq: 0,
            in_flight: None,
        }
    }

    /// The renderable session state.
    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Starts a search, superseding any in-flight request.
    ///
    /// Returns `None` without touching any state when `text` is empty or
    /// whitespace-only. Otherwise the previous request (if any) is aborted at
    /// the transport layer, the session transitions to
    /// [`SearchStatus::Loading`] with a cleared result set, and the caller
    /// receives a [`PendingSearch`] to await.
    pub fn search(&mut self, text: &str, category: Category) -> Option<PendingSearch> {
        let term = text.trim();
        if term.is_empty() {
            return None;
        }

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(seq = previous.seq, "superseding in-flight search");
            previous.abort.abort();
        }

        self.next_seq += 1;
        let seq = self.next_seq;

        self.session.query = term.to_string();
        self.session.category = category;
        self.session.status = SearchStatus::Loading;
        self.session.results.clear();

        let url = build_search_url(&self.base_url, term, category, self.result_limit);
        tracing::debug!(seq, %url, "issuing catalog search");

        let (abort, registration) = AbortHandle::new_pair();
        let request = Abortable::new(self.transport.issue(url), registration);
        self.in_flight = Some(InFlight { seq, abort });

        Some(PendingSearch { seq, request })
    }

    /// Applies a completed request to the session.
    ///
    /// Returns the new status, or `None` when the completion was cancelled or
    /// belongs to a superseded request. A failed request yields
    /// `Some(SearchStatus::Error)` exactly once: the in-flight record is
    /// consumed on the first terminal apply, so it cannot be re-signalled.
    pub fn apply(&mut self, completion: SearchCompletion) -> Option<SearchStatus> {
        let Outcome::Finished(result) = completion.outcome else {
            tracing::debug!(seq = completion.seq, "ignoring cancelled search");
            return None;
        };

        let current = self.in_flight.as_ref().map(|in_flight| in_flight.seq);
        if current != Some(completion.seq) {
            tracing::debug!(seq = completion.seq, "dropping stale search completion");
            return None;
        }
        self.in_flight = None;

        let status = match result {
            Err(error) => {
                tracing::warn!(seq = completion.seq, %error, "catalog search failed");
                self.session.results.clear();
                SearchStatus::Error
            }
            Ok(body) => {
                let mut results = parse_results(&body);
                // Stable sort: ties keep response order.
                results.sort_by_key(|result| result.priority);
                let status = if results.is_empty() {
                    SearchStatus::Empty
                } else {
                    SearchStatus::Loaded
                };
                self.session.results = results;
                status
            }
        };
        self.session.status = status;
        Some(status)
    }
}

/// Builds the catalog request URL with percent-encoded query parameters.
fn build_search_url(base: &Url, term: &str, category: Category, limit: u32) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("term", term);
        pairs.append_pair("limit", &limit.to_string());
        if let Some(token) = category.filter_token() {
            pairs.append_pair("entity", token);
        }
    }
    url
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
