pub mod git_fetcher;

pub use git_fetcher::{CloneProgress, RepoFetcher};
