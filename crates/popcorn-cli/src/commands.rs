//! One-shot subcommand handlers.
//!
//! Each handler drives the same [`Controller`] the interactive shell uses,
//! so command-line and shell behavior can never drift apart.

use anyhow::Result;

use popcorn_api::OmdbClient;
use popcorn_core::controller::{Controller, Effect, SearchFailure, MIN_QUERY_LEN};
use popcorn_core::models::MovieDetail;

/// One-shot title search.
pub async fn search(client: &OmdbClient, controller: &mut Controller, title: &str) -> Result<()> {
    let Effect::Search { query, token } = controller.set_query(title) else {
        println!("Type at least {MIN_QUERY_LEN} characters to search.");
        return Ok(());
    };

    let outcome = client
        .search_by_title(&query, &token)
        .await
        .map_err(SearchFailure::from);
    controller.search_loaded(&token, outcome);

    if let Some(error) = controller.error() {
        println!("{error}");
        return Ok(());
    }
    print_results(controller);
    Ok(())
}

/// Print the full record for one title.
pub async fn info(client: &OmdbClient, controller: &Controller, imdb_id: &str) -> Result<()> {
    let detail = client.fetch_by_id(imdb_id).await?;
    print_detail(&detail, controller);
    Ok(())
}

/// Rate a title and add it to the watched list.
pub async fn add(
    client: &OmdbClient,
    controller: &mut Controller,
    imdb_id: &str,
    rating: u8,
) -> Result<()> {
    if controller.is_watched(imdb_id) {
        println!("{imdb_id} is already on your watched list.");
        return Ok(());
    }

    controller.select_movie(imdb_id);
    let detail = client.fetch_by_id(imdb_id).await?;
    controller.detail_loaded(imdb_id, Ok(detail));
    controller.set_user_rating(rating);

    if controller.add_watched()? {
        println!("Added. {} movies on your watched list.", controller.watched().len());
    }
    Ok(())
}

/// Remove a title from the watched list.
pub fn rm(controller: &mut Controller, imdb_id: &str) -> Result<()> {
    if !controller.is_watched(imdb_id) {
        println!("{imdb_id} is not on your watched list.");
        return Ok(());
    }
    controller.delete_watched(imdb_id)?;
    println!("Removed. {} movies on your watched list.", controller.watched().len());
    Ok(())
}

/// Print the watched list.
pub fn list(controller: &Controller) -> Result<()> {
    if controller.watched().is_empty() {
        println!("Your watched list is empty.");
        return Ok(());
    }
    for entry in controller.watched() {
        println!(
            "{}  ({})  [{}]  you: {}/10  imdb: {}  {}",
            entry.title,
            entry.year,
            entry.imdb_id,
            entry.user_rating,
            fmt_rating(entry.imdb_rating),
            fmt_runtime(entry.runtime_minutes),
        );
    }
    Ok(())
}

/// Print aggregate statistics for the watched list.
pub fn stats(controller: &Controller) -> Result<()> {
    let summary = controller.summary();
    println!("Movies watched:      {}", summary.count);
    println!("Average IMDb rating: {:.1}", summary.avg_imdb_rating);
    println!("Average your rating: {:.1}", summary.avg_user_rating);
    println!(
        "Total watch time:    {}h {:02}m",
        summary.hours(),
        summary.minutes()
    );
    Ok(())
}

// ── Rendering helpers ───────────────────────────────────────────

pub fn print_results(controller: &Controller) {
    println!("Found {} results", controller.result_count());
    for (i, movie) in controller.results().iter().enumerate() {
        let watched = if controller.is_watched(&movie.imdb_id) {
            "*"
        } else {
            " "
        };
        println!(
            "{:>2}.{watched} {}  ({})  [{}]",
            i + 1,
            movie.title,
            movie.year,
            movie.imdb_id
        );
    }
}

pub fn print_detail(detail: &MovieDetail, controller: &Controller) {
    println!("{} ({})", detail.title, detail.year);
    println!("{} | {} | {}", detail.released, detail.runtime, detail.genre);
    println!("IMDb rating: {}", detail.imdb_rating);
    if !detail.awards.is_empty() {
        println!("{}", detail.awards);
    }
    println!();
    println!("{}", detail.plot);
    println!();
    println!("Starring: {}", detail.actors);
    println!("Directed by: {}", detail.director);
    if let Some(rating) = controller.watched_rating(&detail.imdb_id) {
        println!();
        println!("On your watched list, rated {rating}/10.");
    }
}

pub fn fmt_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"))
}

pub fn fmt_runtime(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "N/A".to_string(), |m| format!("{m} min"))
}
