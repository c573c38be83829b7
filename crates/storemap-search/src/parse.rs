//! Wire-format parsing for catalog responses.

use serde::Deserialize;

use crate::types::SearchResult;

/// Response envelope returned by the catalog API:
/// `{"resultCount": N, "results": [...]}`. Only `results` is read.
#[derive(Debug, Deserialize)]
struct ResultPage {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Parses a catalog response body into results.
///
/// Any malformed body degrades to an empty result set: a bad payload renders
/// as "nothing found", not as a failure notice.
#[must_use]
pub fn parse_results(body: &[u8]) -> Vec<SearchResult> {
    match serde_json::from_slice::<ResultPage>(body) {
        Ok(page) => page.results,
        Err(error) => {
            tracing::debug!(%error, "malformed catalog response, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
