mod cli;
mod commands;
mod shell;

use anyhow::Result;
use clap::Parser;

use popcorn_api::OmdbClient;
use popcorn_core::config::AppConfig;
use popcorn_core::store::WatchedStore;
use popcorn_core::Controller;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("popcorn=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = AppConfig::load()?;
    let client = OmdbClient::new(&config.catalog);
    let store = WatchedStore::new(config.watched_path());
    tracing::debug!(path = %store.path().display(), "Using watched list slot");
    let mut controller = Controller::new(store);

    match cli.command.unwrap_or(cli::Command::Shell) {
        cli::Command::Search { title } => commands::search(&client, &mut controller, &title).await,
        cli::Command::Info { imdb_id } => commands::info(&client, &controller, &imdb_id).await,
        cli::Command::Add { imdb_id, rating } => {
            commands::add(&client, &mut controller, &imdb_id, rating).await
        }
        cli::Command::Rm { imdb_id } => commands::rm(&mut controller, &imdb_id),
        cli::Command::List => commands::list(&controller),
        cli::Command::Stats => commands::stats(&controller),
        cli::Command::Shell => shell::run(client, controller).await,
    }
}
