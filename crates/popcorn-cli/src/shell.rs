//! Interactive search shell.
//!
//! Reads stdin lines on a blocking thread and feeds them into the
//! controller as intents; network effects run as spawned tasks whose
//! completions come back over the same channel. A slow response for an
//! old query therefore re-enters the controller like any other event and
//! gets dropped by its token check. The shell never blocks on a search.
//!
//! Plain lines edit the query (one search per line, which is where the
//! minimum-length rule and request cancellation show up). Colon commands
//! carry the other intents: `:3` opens result 3 (again to close), `:rate
//! 8`, `:add`, `:rm <id>`, `:close` (the Escape shortcut), `:clear` (the
//! Enter shortcut), `:list`, `:stats`, `:quit`.

use std::io::Write as _;
use std::sync::Arc;

use tokio::sync::mpsc;

use popcorn_api::OmdbClient;
use popcorn_core::controller::{Controller, Effect, SearchFailure, SearchToken, MIN_QUERY_LEN};
use popcorn_core::models::{MovieDetail, MovieSummary};

use crate::commands;

/// Everything the event loop reacts to.
enum Event {
    Line(String),
    Eof,
    SearchDone {
        token: SearchToken,
        outcome: Result<Vec<MovieSummary>, SearchFailure>,
    },
    DetailDone {
        imdb_id: String,
        outcome: Result<MovieDetail, String>,
    },
}

type EventSender = mpsc::UnboundedSender<Event>;

pub async fn run(client: OmdbClient, mut controller: Controller) -> anyhow::Result<()> {
    let client = Arc::new(client);
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_stdin_reader(tx.clone());

    println!("popcorn: type a title to search (min {MIN_QUERY_LEN} chars), :help for commands.");
    prompt();

    while let Some(event) = rx.recv().await {
        match event {
            Event::Eof => break,
            Event::Line(line) => {
                if handle_line(line.trim(), &mut controller, &client, &tx)? {
                    break;
                }
                prompt();
            }
            Event::SearchDone { token, outcome } => {
                controller.search_loaded(&token, outcome);
                // A superseded response changes nothing; stay quiet and
                // keep waiting for the current one.
                if !controller.loading() {
                    render_search_state(&controller);
                    prompt();
                }
            }
            Event::DetailDone { imdb_id, outcome } => {
                controller.detail_loaded(&imdb_id, outcome);
                if !controller.detail_loading() {
                    render_detail_state(&controller);
                    prompt();
                }
            }
        }
    }

    Ok(())
}

/// Feed stdin lines into the event loop from a dedicated thread.
fn spawn_stdin_reader(tx: EventSender) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut buf = String::new();
        loop {
            buf.clear();
            match stdin.read_line(&mut buf) {
                Ok(0) => {
                    let _ = tx.send(Event::Eof);
                    break;
                }
                Ok(_) => {
                    if tx.send(Event::Line(buf.trim_end().to_string())).is_err() {
                        break;
                    }
                }
                Err(_) => {
                    let _ = tx.send(Event::Eof);
                    break;
                }
            }
        }
    });
}

/// Apply one input line. Returns `true` when the user quits.
fn handle_line(
    line: &str,
    controller: &mut Controller,
    client: &Arc<OmdbClient>,
    tx: &EventSender,
) -> anyhow::Result<bool> {
    if line.is_empty() {
        return Ok(false);
    }

    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        match parts.next().unwrap_or("") {
            "q" | "quit" => return Ok(true),
            "help" => print_help(),
            "clear" => {
                // The Enter shortcut's entry point: reset the search box.
                run_effect(controller.set_query(""), client, tx);
                println!("Search cleared.");
            }
            "close" => {
                // The Escape shortcut's entry point.
                controller.close_detail();
                println!("Closed.");
            }
            "rate" => match parts.next().and_then(|raw| raw.parse::<u8>().ok()) {
                Some(stars) => {
                    controller.set_user_rating(stars);
                    if let Some(stars) = controller.rating_draft() {
                        println!("Draft rating: {stars}/10. Use :add to save.");
                    }
                }
                None => println!("Usage: :rate <1-10>"),
            },
            "add" => match controller.add_watched() {
                Ok(true) => println!(
                    "Added. {} movies on your watched list.",
                    controller.watched().len()
                ),
                Ok(false) if controller.detail().is_none() => {
                    println!("Open a movie first (:<result number>).");
                }
                Ok(false) => println!("Rate it first (:rate <1-10>)."),
                Err(e) => println!("Could not save the watched list: {e}"),
            },
            "rm" => match parts.next() {
                Some(imdb_id) => {
                    if let Err(e) = commands::rm(controller, imdb_id) {
                        println!("Could not save the watched list: {e}");
                    }
                }
                None => println!("Usage: :rm <imdb-id>"),
            },
            "list" => commands::list(controller)?,
            "stats" => commands::stats(controller)?,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 && n <= controller.result_count() => {
                    let imdb_id = controller.results()[n - 1].imdb_id.clone();
                    let effect = controller.select_movie(imdb_id);
                    if matches!(effect, Effect::None) {
                        println!("Closed.");
                    }
                    run_effect(effect, client, tx);
                }
                Ok(n) => println!("No result #{n}."),
                Err(_) => println!("Unknown command :{other}, try :help."),
            },
        }
        return Ok(false);
    }

    // Anything else edits the query.
    let effect = controller.set_query(line);
    if controller.loading() {
        println!("Searching \"{}\"...", controller.query());
    } else {
        println!("(need at least {MIN_QUERY_LEN} characters, results cleared)");
    }
    run_effect(effect, client, tx);
    Ok(false)
}

/// Run a controller effect on the runtime, routing the completion back
/// into the event loop.
fn run_effect(effect: Effect, client: &Arc<OmdbClient>, tx: &EventSender) {
    match effect {
        Effect::None => {}
        Effect::Search { query, token } => {
            let client = Arc::clone(client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client
                    .search_by_title(&query, &token)
                    .await
                    .map_err(SearchFailure::from);
                let _ = tx.send(Event::SearchDone { token, outcome });
            });
        }
        Effect::FetchDetail { imdb_id } => {
            let client = Arc::clone(client);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client.fetch_by_id(&imdb_id).await.map_err(|e| e.to_string());
                let _ = tx.send(Event::DetailDone { imdb_id, outcome });
            });
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────

fn render_search_state(controller: &Controller) {
    match controller.error() {
        Some(error) => println!("{error}"),
        None => commands::print_results(controller),
    }
}

fn render_detail_state(controller: &Controller) {
    if let Some(error) = controller.detail_error() {
        println!("{error}");
        return;
    }
    let Some(detail) = controller.detail() else {
        return;
    };
    println!();
    commands::print_detail(detail, controller);
    if !controller.is_watched(&detail.imdb_id) {
        println!();
        println!("Rate it with :rate <1-10>, then :add to save.");
    }
}

fn print_help() {
    println!("Type a movie title to search (min {MIN_QUERY_LEN} characters).");
    println!("  :<n>         open result n / close it again");
    println!("  :rate <1-10> set your star rating for the open movie");
    println!("  :add         add the open movie to your watched list");
    println!("  :rm <id>     remove a movie from your watched list");
    println!("  :list        show your watched list");
    println!("  :stats       show watched-list statistics");
    println!("  :close       close the open movie (Escape)");
    println!("  :clear       clear the search (Enter)");
    println!("  :quit        exit");
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
