//! Serde types for the publication's JSON data files.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::Dated;

/// Article title block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Title {
    /// Display text of the title.
    pub text: String,
    /// Presentation fields preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Article summary block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Summary {
    /// Summary body text.
    pub content: String,
    /// Presentation fields preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single article as stored in `articles.json`.
///
/// Only the fields the backend ranks and searches on are typed; everything
/// else rides along untouched and serializes back out as-is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    /// Title block.
    pub title: Title,
    /// Optional summary block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    /// Author byline.
    pub author: String,
    /// Publication date as written in the data file.
    pub date: String,
    /// Remaining payload fields preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Article {
    /// Parse the article's date into UTC.
    ///
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates (read as
    /// midnight UTC). Returns `None` for anything else.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.date) {
            return Some(ts.with_timezone(&Utc));
        }
        self.date
            .parse::<NaiveDate>()
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Case-insensitive substring match over title, summary and author.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.text.to_lowercase().contains(&needle)
            || self
                .summary
                .as_ref()
                .is_some_and(|s| s.content.to_lowercase().contains(&needle))
            || self.author.to_lowercase().contains(&needle)
    }
}

/// One issue's articles, keyed by section name.
pub type IssueArticles = BTreeMap<String, Vec<Article>>;

/// An article paired with its parsed publication date, ready for ranking.
#[derive(Clone, Debug, Serialize)]
pub struct FeedItem {
    /// Parsed publication date.
    #[serde(skip)]
    pub date: DateTime<Utc>,
    /// The article payload, serialized as the article itself.
    #[serde(flatten)]
    pub article: Article,
}

impl Dated for FeedItem {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn article(json: serde_json::Value) -> Article {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_date_only_parses_to_midnight_utc() {
        let a = article(serde_json::json!({
            "title": { "text": "Harvest" },
            "author": "R. Finch",
            "date": "2024-03-05"
        }));
        let parsed = a.published_at().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-05T00:00:00+00:00");
    }

    #[test]
    fn test_rfc3339_parses() {
        let a = article(serde_json::json!({
            "title": { "text": "Harvest" },
            "author": "R. Finch",
            "date": "2024-03-05T12:30:00+02:00"
        }));
        assert!(a.published_at().is_some());
    }

    #[test]
    fn test_bad_date_is_none() {
        let a = article(serde_json::json!({
            "title": { "text": "Harvest" },
            "author": "R. Finch",
            "date": "next tuesday"
        }));
        assert!(a.published_at().is_none());
    }

    #[test]
    fn test_matches_title_summary_and_author() {
        let a = article(serde_json::json!({
            "title": { "text": "The Long Winter" },
            "summary": { "content": "Snowfall records across the county." },
            "author": "M. Alvarez",
            "date": "2024-01-01"
        }));
        assert!(a.matches("winter"));
        assert!(a.matches("SNOWFALL"));
        assert!(a.matches("alvarez"));
        assert!(!a.matches("baseball"));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let source = serde_json::json!({
            "title": { "text": "The Long Winter", "style": "serif" },
            "author": "M. Alvarez",
            "date": "2024-01-01",
            "imageUrl": "winter.jpg"
        });
        let a = article(source.clone());
        let back = serde_json::to_value(&a).unwrap();
        assert_eq!(back, source);
    }
}
