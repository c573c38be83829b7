//! Domain types for catalog search.

use serde::Deserialize;

/// Catalog verticals the user can filter a search by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Music,
    Software,
    Ebooks,
}

/// Provider filter tokens, one row per category: `(category, selector index,
/// provider token)`. Adding a catalog vertical means adding a row here, not
/// touching the request builder.
const FILTER_TOKENS: &[(Category, u8, &str)] = &[
    (Category::All, 0, ""),
    (Category::Music, 1, "musicTrack"),
    (Category::Software, 2, "software"),
    (Category::Ebooks, 3, "ebook"),
];

impl Category {
    /// Maps a segmented-selector index to a category.
    ///
    /// Unrecognized indexes fall back to [`Category::All`].
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        FILTER_TOKENS
            .iter()
            .find(|(_, i, _)| *i == index)
            .map_or(Category::All, |(category, _, _)| *category)
    }

    /// The provider's filter token, or `None` when the category does not
    /// narrow the search.
    #[must_use]
    pub fn filter_token(self) -> Option<&'static str> {
        FILTER_TOKENS
            .iter()
            .find(|(category, _, _)| *category == self)
            .and_then(|(_, _, token)| (!token.is_empty()).then_some(*token))
    }
}

/// Presentation state of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search has run yet.
    #[default]
    Idle,
    /// A request is in flight; the current result set is stale.
    Loading,
    /// The most recent request completed with zero results.
    Empty,
    /// The most recent request failed.
    Error,
    /// The most recent request completed with at least one result.
    Loaded,
}

/// A single catalog entry. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub artwork_url: Option<String>,
    /// Provider kind tag, e.g. `"song"` or `"software"`.
    #[serde(default)]
    pub kind: String,
    /// Display ordering key; lower sorts first.
    #[serde(default)]
    pub priority: i64,
}

/// The renderable state of one search screen: what was asked, where the
/// request stands, and the ordered results.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pub query: String,
    pub category: Category,
    pub status: SearchStatus,
    pub results: Vec<SearchResult>,
}
