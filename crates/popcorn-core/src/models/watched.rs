use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MovieDetail;

/// One movie on the user's watched list.
///
/// The list is append-only and persisted wholesale after every mutation.
/// Catalog numbers that could not be parsed are stored as `None` and
/// excluded from aggregation, never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub imdb_rating: Option<f64>,
    pub runtime_minutes: Option<u32>,
    /// The user's own star rating, 1-10.
    pub user_rating: u8,
    /// How many times the user changed the rating before saving.
    pub rating_revision_count: u32,
    pub added_at: DateTime<Utc>,
}

impl WatchedEntry {
    /// Build an entry from an open detail view and the user's rating.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, rating_revision_count: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster_url: detail.poster_url.clone(),
            imdb_rating: detail.imdb_rating_value(),
            runtime_minutes: detail.runtime_minutes(),
            user_rating,
            rating_revision_count,
            added_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail_degrades_unparseable_numbers() {
        let detail = MovieDetail {
            imdb_id: "tt0137523".into(),
            title: "Fight Club".into(),
            year: "1999".into(),
            poster_url: "https://example.test/poster.jpg".into(),
            runtime: "N/A".into(),
            imdb_rating: "N/A".into(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
            awards: String::new(),
        };

        let entry = WatchedEntry::from_detail(&detail, 9, 3);
        assert_eq!(entry.imdb_id, "tt0137523");
        assert_eq!(entry.imdb_rating, None);
        assert_eq!(entry.runtime_minutes, None);
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.rating_revision_count, 3);
    }

    #[test]
    fn test_entry_json_round_trip() {
        let detail = MovieDetail {
            imdb_id: "tt1375666".into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster_url: String::new(),
            runtime: "148 min".into(),
            imdb_rating: "8.8".into(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
            awards: String::new(),
        };
        let entry = WatchedEntry::from_detail(&detail, 10, 1);

        let json = serde_json::to_string(&entry).unwrap();
        let back: WatchedEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.runtime_minutes, Some(148));
    }
}
