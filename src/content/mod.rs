//! File-backed content access for the publication.
//!
//! The data directory holds one folder per issue (`issue<N>/` with
//! `articles.json`, `connections.json`, `crossword.json`), a
//! `current_issue_number.txt` pointer and an `images/` folder. Everything
//! here is read-only: there is no write path.

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::ContentConfig;
pub use error::ContentError;
pub use store::ContentStore;
pub use types::{Article, FeedItem, IssueArticles, Summary, Title};
