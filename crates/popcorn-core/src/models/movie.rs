use serde::{Deserialize, Serialize};

/// One row of a catalog title search.
///
/// Ephemeral: the whole result list is replaced on every new search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Full catalog record for one title, fetched when the user opens it.
///
/// Numeric-ish fields (`runtime`, `imdb_rating`) are kept as the free text
/// the catalog reports ("148 min", "8.8", "N/A") and only parsed at the
/// moment an entry is added to the watched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime: String,
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
    pub awards: String,
}

impl MovieDetail {
    /// Leading numeric token of the free-text runtime: "148 min" -> 148.
    ///
    /// Anything that does not start with a number ("N/A", "2h 28min")
    /// yields `None`.
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime.split_whitespace().next()?.parse().ok()
    }

    /// The IMDb rating as a number, or `None` when the catalog has none.
    pub fn imdb_rating_value(&self) -> Option<f64> {
        self.imdb_rating.trim().parse().ok()
    }
}
