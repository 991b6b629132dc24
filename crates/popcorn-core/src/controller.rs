//! The search/selection state machine.
//!
//! [`Controller`] owns every piece of screen state: the query, the result
//! list, loading/error status, the current selection with its detail
//! record and draft rating, and the watched list. User intents are plain
//! method calls; each returns an [`Effect`] describing the I/O the
//! front-end must run. Completions come back through
//! [`Controller::search_loaded`] / [`Controller::detail_loaded`], which
//! refuse to apply anything stale.
//!
//! Only one search is ever logically current. Editing the query cancels
//! the previous [`SearchToken`] and (for long-enough queries) mints a
//! fresh one, so the last query wins no matter in which order responses
//! arrive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::PopcornError;
use crate::models::{MovieDetail, MovieSummary, WatchedEntry};
use crate::store::WatchedStore;
use crate::summary::{summarize, WatchedSummary};

/// Queries shorter than this never reach the catalog.
pub const MIN_QUERY_LEN: usize = 3;

/// Star rating bounds.
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Cancellation handle for one search request.
///
/// The controller cancels the handle when a newer query supersedes the
/// request; the catalog client checks the flag before applying a response.
/// The transport itself is never assumed to support cooperative abort: a
/// cancelled request may well complete on the wire, it just must not
/// mutate state.
#[derive(Debug, Clone, Default)]
pub struct SearchToken {
    cancelled: Arc<AtomicBool>,
}

impl SearchToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether two handles refer to the same request.
    fn same_request(&self, other: &SearchToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// Why a search came back without results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// Superseded by a newer query; never shown to the user.
    Cancelled,
    /// The catalog's explicit empty-result marker.
    NoMatch,
    /// Transport or decode failure, with display text.
    Failed(String),
}

/// I/O the front-end must perform on behalf of the controller.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Run a title search, then feed the outcome back through
    /// [`Controller::search_loaded`] together with the same token.
    Search { query: String, token: SearchToken },
    /// Fetch the detail record, then feed the outcome back through
    /// [`Controller::detail_loaded`].
    FetchDetail { imdb_id: String },
}

/// Screen state and watched list, with write-through persistence.
pub struct Controller {
    query: String,
    results: Vec<MovieSummary>,
    loading: bool,
    error: Option<String>,
    selected: Option<String>,
    detail: Option<MovieDetail>,
    detail_loading: bool,
    detail_error: Option<String>,
    rating_draft: Option<u8>,
    rating_revisions: u32,
    watched: Vec<WatchedEntry>,
    store: WatchedStore,
    current_search: Option<SearchToken>,
}

impl Controller {
    /// Create a controller over the given store, loading whatever watched
    /// list it holds (an absent or malformed slot loads as empty).
    pub fn new(store: WatchedStore) -> Self {
        let watched = store.load();
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            detail: None,
            detail_loading: false,
            detail_error: None,
            rating_draft: None,
            rating_revisions: 0,
            watched,
            store,
            current_search: None,
        }
    }

    // ── Search lifecycle ──────────────────────────────────────────

    /// Replace the query and re-evaluate the search lifecycle.
    pub fn set_query(&mut self, query: impl Into<String>) -> Effect {
        self.query = query.into();
        self.on_query_changed()
    }

    fn on_query_changed(&mut self) -> Effect {
        // Whatever happens next, the previous request must not win.
        if let Some(token) = self.current_search.take() {
            token.cancel();
        }

        if self.query.chars().count() < MIN_QUERY_LEN {
            self.results.clear();
            self.error = None;
            self.loading = false;
            return Effect::None;
        }

        self.close_detail();
        let token = SearchToken::new();
        self.current_search = Some(token.clone());
        self.loading = true;
        self.error = None;
        tracing::debug!(query = %self.query, "Starting catalog search");
        Effect::Search {
            query: self.query.clone(),
            token,
        }
    }

    /// Apply a finished search. Responses whose token is no longer the
    /// current one are dropped wholesale; a stale request neither updates
    /// results nor surfaces an error.
    pub fn search_loaded(
        &mut self,
        token: &SearchToken,
        outcome: Result<Vec<MovieSummary>, SearchFailure>,
    ) {
        let is_current = self
            .current_search
            .as_ref()
            .is_some_and(|current| current.same_request(token) && !token.is_cancelled());
        if !is_current {
            tracing::debug!("Dropping superseded search response");
            return;
        }

        self.current_search = None;
        self.loading = false;
        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(SearchFailure::Cancelled) => {}
            Err(SearchFailure::NoMatch) => {
                self.results.clear();
                self.error = Some(NOT_FOUND_MESSAGE.to_string());
            }
            Err(SearchFailure::Failed(message)) => {
                tracing::warn!(error = %message, "Catalog search failed");
                self.results.clear();
                self.error = Some(message);
            }
        }
    }

    // ── Selection & detail ────────────────────────────────────────

    /// Toggle the selection: a new id opens its detail view, the already
    /// selected id closes it.
    pub fn select_movie(&mut self, imdb_id: impl Into<String>) -> Effect {
        let imdb_id = imdb_id.into();
        if self.selected.as_deref() == Some(imdb_id.as_str()) {
            self.close_detail();
            return Effect::None;
        }

        self.close_detail();
        self.selected = Some(imdb_id.clone());
        self.detail_loading = true;
        Effect::FetchDetail { imdb_id }
    }

    /// Apply a finished detail fetch. A fetch for anything other than the
    /// current selection was superseded and is dropped.
    pub fn detail_loaded(&mut self, imdb_id: &str, outcome: Result<MovieDetail, String>) {
        if self.selected.as_deref() != Some(imdb_id) {
            tracing::debug!(imdb_id, "Dropping detail for a stale selection");
            return;
        }

        self.detail_loading = false;
        match outcome {
            Ok(detail) => self.detail = Some(detail),
            Err(message) => {
                tracing::warn!(imdb_id, error = %message, "Detail fetch failed");
                self.detail_error = Some(message);
            }
        }
    }

    /// Close the detail view and drop everything tied to it.
    pub fn close_detail(&mut self) {
        self.selected = None;
        self.detail = None;
        self.detail_loading = false;
        self.detail_error = None;
        self.rating_draft = None;
        self.rating_revisions = 0;
    }

    /// Set the draft star rating for the open detail view, clamped to
    /// 1-10. Each change bumps the revision counter recorded at add time.
    pub fn set_user_rating(&mut self, stars: u8) {
        let stars = stars.clamp(MIN_RATING, MAX_RATING);
        if self.rating_draft == Some(stars) {
            return;
        }
        self.rating_draft = Some(stars);
        self.rating_revisions += 1;
    }

    // ── Watched list ──────────────────────────────────────────────

    /// Append the open movie to the watched list with the draft rating,
    /// write through to the store, and close the detail view.
    ///
    /// Returns `Ok(false)` when there is no open detail or no rating yet;
    /// the front-end only offers the action once both exist.
    pub fn add_watched(&mut self) -> Result<bool, PopcornError> {
        let (Some(detail), Some(rating)) = (&self.detail, self.rating_draft) else {
            return Ok(false);
        };

        let entry = WatchedEntry::from_detail(detail, rating, self.rating_revisions);
        tracing::info!(imdb_id = %entry.imdb_id, rating, "Adding to watched list");
        self.watched.push(entry);
        self.store.save(&self.watched)?;
        self.close_detail();
        Ok(true)
    }

    /// Remove every entry with this id and write through to the store.
    pub fn delete_watched(&mut self, imdb_id: &str) -> Result<(), PopcornError> {
        self.watched.retain(|entry| entry.imdb_id != imdb_id);
        self.store.save(&self.watched)
    }

    // ── Derived state ─────────────────────────────────────────────

    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    /// The rating the user gave a movie already on the list.
    pub fn watched_rating(&self, imdb_id: &str) -> Option<u8> {
        self.watched
            .iter()
            .find(|entry| entry.imdb_id == imdb_id)
            .map(|entry| entry.user_rating)
    }

    pub fn summary(&self) -> WatchedSummary {
        summarize(&self.watched)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn detail_loading(&self) -> bool {
        self.detail_loading
    }

    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    pub fn rating_draft(&self) -> Option<u8> {
        self.rating_draft
    }

    pub fn watched(&self) -> &[WatchedEntry] {
        &self.watched
    }
}
