//! File-backed access to issues, articles and puzzles.

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::config::ContentConfig;
use crate::content::error::ContentError;
use crate::content::types::{Article, FeedItem, IssueArticles};

/// Pointer file naming the current issue.
const CURRENT_ISSUE_FILE: &str = "current_issue_number.txt";

/// Read-only store over the publication's data directory.
pub struct ContentStore {
    config: ContentConfig,
    current_issue: u32,
}

impl ContentStore {
    /// Open a store over the configured data directory.
    ///
    /// The current-issue pointer is read once here. An unreadable or
    /// malformed pointer falls back to `config.fallback_issue` with a
    /// warning, so startup never fails on a bad pointer.
    #[must_use]
    pub fn open(config: ContentConfig) -> Self {
        let current_issue = read_current_issue(&config.data_dir).unwrap_or_else(|e| {
            tracing::warn!(
                fallback = config.fallback_issue,
                "unreadable current-issue pointer: {e}"
            );
            config.fallback_issue
        });
        Self {
            config,
            current_issue,
        }
    }

    /// Current issue number.
    #[must_use]
    pub const fn current_issue(&self) -> u32 {
        self.current_issue
    }

    /// Store configuration.
    #[must_use]
    pub const fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Load the current issue's articles, keyed by section.
    pub fn current_articles(&self) -> Result<IssueArticles, ContentError> {
        self.issue_articles(self.current_issue)
    }

    /// Load one issue's articles, keyed by section.
    pub fn issue_articles(&self, issue: u32) -> Result<IssueArticles, ContentError> {
        read_json(&self.issue_file(issue, "articles.json"))
    }

    /// Load the current issue's connections puzzle, served verbatim.
    pub fn current_connections(&self) -> Result<serde_json::Value, ContentError> {
        read_json(&self.issue_file(self.current_issue, "connections.json"))
    }

    /// Load the current issue's crossword, served verbatim.
    pub fn current_crossword(&self) -> Result<serde_json::Value, ContentError> {
        read_json(&self.issue_file(self.current_issue, "crossword.json"))
    }

    /// Every article across every issue directory, in directory order.
    pub fn all_articles(&self) -> Result<Vec<Article>, ContentError> {
        let mut articles = Vec::new();
        for issue in self.issue_maps()? {
            for section in issue.into_values() {
                articles.extend(section);
            }
        }
        Ok(articles)
    }

    /// Articles belonging to one section, across all issues.
    ///
    /// Section names compare case-insensitively. A section that appears in
    /// no issue is reported as `NotFound`.
    pub fn collection(&self, section: &str) -> Result<Vec<Article>, ContentError> {
        let mut found = false;
        let mut articles = Vec::new();
        for issue in self.issue_maps()? {
            for (name, items) in issue {
                if name.eq_ignore_ascii_case(section) {
                    found = true;
                    articles.extend(items);
                }
            }
        }
        if found {
            Ok(articles)
        } else {
            Err(ContentError::NotFound(format!("section {section}")))
        }
    }

    /// Dated feed items for `section`, or the whole corpus when `None`.
    ///
    /// Articles whose date cannot be parsed are skipped with a warning, so
    /// the ranking stage only ever sees well-formed items.
    pub fn feed_items(&self, section: Option<&str>) -> Result<Vec<FeedItem>, ContentError> {
        let articles = match section {
            Some(name) => self.collection(name)?,
            None => self.all_articles()?,
        };
        let mut items = Vec::with_capacity(articles.len());
        for article in articles {
            match article.published_at() {
                Some(date) => items.push(FeedItem { date, article }),
                None => tracing::warn!(
                    title = %article.title.text,
                    date = %article.date,
                    "skipping article with unparseable date"
                ),
            }
        }
        Ok(items)
    }

    /// Case-insensitive substring search over title, summary and author.
    pub fn search(&self, terms: &str) -> Result<Vec<Article>, ContentError> {
        Ok(self
            .all_articles()?
            .into_iter()
            .filter(|a| a.matches(terms))
            .collect())
    }

    /// Resolve an image file under `images/`.
    ///
    /// Names carrying a separator or a parent reference are rejected; the
    /// endpoint must never read outside the images folder.
    pub fn image_path(&self, name: &str) -> Result<PathBuf, ContentError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(ContentError::InvalidImageName(name.to_string()));
        }
        let path = self.config.data_dir.join("images").join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ContentError::NotFound(format!("image {name}")))
        }
    }

    fn issue_file(&self, issue: u32, file: &str) -> PathBuf {
        self.config.data_dir.join(format!("issue{issue}")).join(file)
    }

    /// Parsed `articles.json` of every issue directory, sorted by path so
    /// the concatenation order is deterministic.
    fn issue_maps(&self) -> Result<Vec<IssueArticles>, ContentError> {
        let dir = &self.config.data_dir;
        let entries = fs::read_dir(dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut issue_dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        issue_dirs.sort();

        let mut maps = Vec::new();
        for issue_dir in issue_dirs {
            let path = issue_dir.join("articles.json");
            if path.is_file() {
                maps.push(read_json(&path)?);
            }
        }
        Ok(maps)
    }
}

fn read_current_issue(data_dir: &Path) -> Result<u32, ContentError> {
    let path = data_dir.join(CURRENT_ISSUE_FILE);
    let raw = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    raw.trim()
        .parse()
        .map_err(|_| ContentError::InvalidIssuePointer(raw.trim().to_string()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    if !path.is_file() {
        return Err(ContentError::NotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn article_json(title: &str, author: &str, date: &str) -> serde_json::Value {
        serde_json::json!({
            "title": { "text": title },
            "summary": { "content": format!("{title} in brief") },
            "author": author,
            "date": date
        })
    }

    /// Two issues: issue1 with news+sports, issue2 (current) with news.
    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CURRENT_ISSUE_FILE), "2\n").unwrap();

        let issue1 = dir.path().join("issue1");
        fs::create_dir(&issue1).unwrap();
        fs::write(
            issue1.join("articles.json"),
            serde_json::json!({
                "news": [article_json("Town Hall Vote", "A. Osei", "2024-01-01")],
                "sports": [article_json("Cup Final", "B. Ruiz", "2024-01-02")]
            })
            .to_string(),
        )
        .unwrap();

        let issue2 = dir.path().join("issue2");
        fs::create_dir(&issue2).unwrap();
        fs::write(
            issue2.join("articles.json"),
            serde_json::json!({
                "news": [
                    article_json("Bridge Reopens", "A. Osei", "2024-02-01"),
                    article_json("Budget Passed", "C. Dumas", "not-a-date")
                ]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            issue2.join("connections.json"),
            serde_json::json!({ "groups": [] }).to_string(),
        )
        .unwrap();

        dir
    }

    fn store(dir: &TempDir) -> ContentStore {
        ContentStore::open(ContentConfig::new().with_data_dir(dir.path()))
    }

    #[test]
    fn test_current_issue_pointer() {
        let dir = fixture();
        assert_eq!(store(&dir).current_issue(), 2);
    }

    #[test]
    fn test_missing_pointer_falls_back() {
        let dir = TempDir::new().unwrap();
        let s = ContentStore::open(
            ContentConfig::new()
                .with_data_dir(dir.path())
                .with_fallback_issue(7),
        );
        assert_eq!(s.current_issue(), 7);
    }

    #[test]
    fn test_current_articles_and_missing_puzzles() {
        let dir = fixture();
        let s = store(&dir);

        let articles = s.current_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles["news"].len(), 2);

        assert!(s.current_connections().is_ok());
        let crossword = s.current_crossword();
        assert!(matches!(crossword, Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_all_articles_concatenates_every_issue() {
        let dir = fixture();
        assert_eq!(store(&dir).all_articles().unwrap().len(), 4);
    }

    #[test]
    fn test_collection_is_case_insensitive() {
        let dir = fixture();
        let s = store(&dir);
        assert_eq!(s.collection("NEWS").unwrap().len(), 3);
        assert_eq!(s.collection("sports").unwrap().len(), 1);
        assert!(matches!(
            s.collection("opinion"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn test_feed_items_skip_unparseable_dates() {
        let dir = fixture();
        let items = store(&dir).feed_items(None).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.article.title.text != "Budget Passed"));
    }

    #[test]
    fn test_search_matches_title_summary_author() {
        let dir = fixture();
        let s = store(&dir);
        assert_eq!(s.search("bridge").unwrap().len(), 1);
        assert_eq!(s.search("osei").unwrap().len(), 2);
        assert_eq!(s.search("in brief").unwrap().len(), 4);
        assert!(s.search("zeppelin").unwrap().is_empty());
    }

    #[test]
    fn test_image_path_rejects_traversal() {
        let dir = fixture();
        let s = store(&dir);
        assert!(matches!(
            s.image_path("../issue1/articles.json"),
            Err(ContentError::InvalidImageName(_))
        ));
        assert!(matches!(
            s.image_path("a/b.png"),
            Err(ContentError::InvalidImageName(_))
        ));
        assert!(matches!(
            s.image_path("missing.png"),
            Err(ContentError::NotFound(_))
        ));
    }

    #[test]
    fn test_image_path_resolves_existing_file() {
        let dir = fixture();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("cover.png"), b"png").unwrap();

        let path = store(&dir).image_path("cover.png").unwrap();
        assert!(path.ends_with("images/cover.png"));
    }
}
