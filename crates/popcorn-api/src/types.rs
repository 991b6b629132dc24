use serde::Deserialize;

use popcorn_core::models::{MovieDetail, MovieSummary};

// ── Search response ─────────────────────────────────────────────

/// Response envelope for a title search.
///
/// The catalog signals "no results" in-band: `Response` is the string
/// `"False"` and `Error` carries the reason instead of an HTTP status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchPage {
    pub response: String,
    #[serde(default)]
    pub search: Vec<SearchItem>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub poster: String,
}

impl SearchPage {
    pub fn is_no_match(&self) -> bool {
        self.response != "True"
    }
}

impl SearchItem {
    pub fn into_summary(self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: self.poster,
        }
    }
}

// ── Detail response ─────────────────────────────────────────────

/// Flat detail payload for one title.
///
/// Every text field defaults ("" or "N/A") rather than failing the whole
/// record when the catalog omits it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailPayload {
    pub response: String,
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default = "not_available")]
    pub runtime: String,
    #[serde(rename = "imdbRating", default = "not_available")]
    pub imdb_rating: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub awards: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

impl DetailPayload {
    pub fn is_no_match(&self) -> bool {
        self.response != "True"
    }

    pub fn into_detail(self) -> MovieDetail {
        MovieDetail {
            imdb_id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster_url: self.poster,
            runtime: self.runtime,
            imdb_rating: self.imdb_rating,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
            awards: self.awards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_page() {
        let json = r#"{
            "Search": [
                {
                    "Title": "Inception",
                    "Year": "2010",
                    "imdbID": "tt1375666",
                    "Type": "movie",
                    "Poster": "https://m.media-amazon.com/images/M/inception.jpg"
                },
                {
                    "Title": "Inception: The Cobol Job",
                    "Year": "2010",
                    "imdbID": "tt5295894",
                    "Type": "movie",
                    "Poster": "N/A"
                }
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(!page.is_no_match());
        assert_eq!(page.search.len(), 2);

        let first = page.search.into_iter().next().unwrap().into_summary();
        assert_eq!(first.imdb_id, "tt1375666");
        assert_eq!(first.title, "Inception");
        assert_eq!(first.year, "2010");
        assert!(first.poster_url.ends_with("inception.jpg"));
    }

    #[test]
    fn test_deserialize_no_match_marker() {
        let json = r#"{ "Response": "False", "Error": "Movie not found!" }"#;

        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert!(page.is_no_match());
        assert!(page.search.is_empty());
        assert_eq!(page.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn test_deserialize_detail_payload() {
        let json = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Released": "16 Jul 2010",
            "Runtime": "148 min",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
            "Plot": "A thief who steals corporate secrets through dream-sharing technology.",
            "Awards": "Won 4 Oscars. 159 wins & 220 nominations total",
            "Poster": "https://m.media-amazon.com/images/M/inception.jpg",
            "imdbRating": "8.8",
            "imdbID": "tt1375666",
            "Type": "movie",
            "Response": "True"
        }"#;

        let payload: DetailPayload = serde_json::from_str(json).unwrap();
        assert!(!payload.is_no_match());

        let detail = payload.into_detail();
        assert_eq!(detail.imdb_id, "tt1375666");
        assert_eq!(detail.runtime, "148 min");
        assert_eq!(detail.runtime_minutes(), Some(148));
        assert_eq!(detail.imdb_rating_value(), Some(8.8));
        assert_eq!(detail.director, "Christopher Nolan");
    }

    #[test]
    fn test_deserialize_minimal_detail() {
        let json = r#"{ "Response": "True", "imdbID": "tt0000001", "Title": "Test" }"#;

        let detail: MovieDetail = serde_json::from_str::<DetailPayload>(json)
            .unwrap()
            .into_detail();
        assert_eq!(detail.runtime, "N/A");
        assert_eq!(detail.imdb_rating, "N/A");
        assert_eq!(detail.runtime_minutes(), None);
        assert_eq!(detail.imdb_rating_value(), None);
        assert_eq!(detail.plot, "");
    }
}
