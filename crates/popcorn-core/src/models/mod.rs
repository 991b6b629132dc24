mod movie;
mod watched;

pub use movie::{MovieDetail, MovieSummary};
pub use watched::WatchedEntry;
