use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "popcorn",
    version,
    about = "Search the movie catalog and track what you watched"
)]
pub struct Cli {
    /// No subcommand drops into the interactive shell.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the catalog by title
    Search {
        title: String,
    },
    /// Show the full record for one title
    Info {
        imdb_id: String,
    },
    /// Rate a title and add it to the watched list
    Add {
        imdb_id: String,
        /// Your star rating, 1-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a title from the watched list
    Rm {
        imdb_id: String,
    },
    /// Print the watched list
    List,
    /// Print aggregate statistics for the watched list
    Stats,
    /// Interactive search shell
    Shell,
}
