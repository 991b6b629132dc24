//! Aggregate statistics over the watched list.

use crate::models::WatchedEntry;

/// Summary numbers for the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub total_runtime_minutes: u32,
}

impl WatchedSummary {
    /// Whole hours of the total watch time.
    pub fn hours(&self) -> u32 {
        self.total_runtime_minutes / 60
    }

    /// Minutes left over after the whole hours.
    pub fn minutes(&self) -> u32 {
        self.total_runtime_minutes % 60
    }
}

/// Compute summary statistics.
///
/// Entries whose catalog numbers are unknown are excluded from the
/// affected mean or sum but still counted. An empty input (or one with no
/// usable numbers) reports `0`, not an error.
pub fn summarize(watched: &[WatchedEntry]) -> WatchedSummary {
    let imdb: Vec<f64> = watched.iter().filter_map(|e| e.imdb_rating).collect();
    let user: Vec<f64> = watched.iter().map(|e| f64::from(e.user_rating)).collect();

    WatchedSummary {
        count: watched.len(),
        avg_imdb_rating: mean(&imdb),
        avg_user_rating: mean(&user),
        total_runtime_minutes: watched.iter().filter_map(|e| e.runtime_minutes).sum(),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
