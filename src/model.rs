use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One news item as the backend sends it. `link` is the identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub link: String,
    pub published: String,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// Parses `published` as RFC 3339, falling back to a naive ISO datetime in UTC.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.published.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Stable sort, newest first. Unparseable timestamps go last.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by_key(|a| std::cmp::Reverse(a.published_at()));
}

#[cfg(test)]
pub(crate) fn article(link: &str, source: &str, published: &str) -> Article {
    Article {
        id: None,
        title: format!("Title for {link}"),
        summary: Some(format!("Summary for {link}")),
        link: link.to_string(),
        published: published.to_string(),
        source: source.to_string(),
        tags: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = article("a", "Reddit", "2025-01-02T03:04:05");
        let fractional = article("b", "Reddit", "2025-01-02T03:04:05.123456");
        let offset = article("c", "Reddit", "2025-01-02T04:04:05+01:00");

        assert_eq!(naive.published_at(), offset.published_at());
        assert!(fractional.published_at() > naive.published_at());
        assert!(article("d", "x", "yesterday").published_at().is_none());
    }

    #[test]
    fn sort_is_stable_and_puts_unparseable_last() {
        let mut items = vec![
            article("junk", "x", "not a date"),
            article("old", "x", "2024-01-01T00:00:00"),
            article("tie-1", "x", "2025-01-01T00:00:00"),
            article("tie-2", "x", "2025-01-01T00:00:00"),
        ];
        sort_newest_first(&mut items);

        let links: Vec<_> = items.iter().map(|a| a.link.as_str()).collect();
        assert_eq!(links, ["tie-1", "tie-2", "old", "junk"]);
    }

    #[test]
    fn ignores_unknown_fields_and_defaults_tags() {
        let json = r#"{"id":"1","title":"t","summary":"s","link":"l",
            "published":"2025-01-01T00:00:00","source":"Ben's Bites","saved":false}"#;
        let a: Article = serde_json::from_str(json).unwrap();
        assert!(a.tags.is_empty());
        assert_eq!(a.id.as_deref(), Some("1"));
    }
}
