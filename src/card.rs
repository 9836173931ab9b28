use chrono::{DateTime, Local, Utc};

use crate::model::Article;
use crate::time_ago::time_ago;

pub const NO_SUMMARY: &str = "No summary available.";
const SHOWN_TAGS: usize = 2;

/// Display element for one article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub link: String,
    pub source: String,
    /// Lower-cased source with non-alphanumerics replaced, used to pick a badge colour.
    pub source_class: String,
    pub title: String,
    pub summary: String,
    pub age: String,
    /// Absolute local time, shown in the detail pane.
    pub published_full: String,
    pub tags: Vec<String>,
    pub saved: bool,
}

impl Card {
    pub fn render(article: &Article, saved: bool, now: DateTime<Utc>) -> Self {
        let (age, published_full) = match article.published_at() {
            Some(at) => (
                time_ago(at, now),
                at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            None => ("unknown date".to_string(), article.published.clone()),
        };

        let summary = article
            .summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_SUMMARY)
            .to_string();

        Self {
            link: article.link.clone(),
            source: article.source.clone(),
            source_class: source_class(&article.source),
            title: article.title.clone(),
            summary,
            age,
            published_full,
            tags: article
                .tags
                .iter()
                .take(SHOWN_TAGS)
                .map(|t| format!("#{t}"))
                .collect(),
            saved,
        }
    }

    pub fn set_saved(&mut self, saved: bool) {
        self.saved = saved;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.saved {
            "Remove from Saved"
        } else {
            "Save for later"
        }
    }

    pub fn marker(&self) -> &'static str {
        if self.saved {
            "★"
        } else {
            "☆"
        }
    }
}

fn source_class(source: &str) -> String {
    source
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::article;
    use chrono::TimeZone;

    #[test]
    fn renders_fields() {
        let mut a = article("https://x/1", "Ben's Bites", "2025-01-01T00:00:00");
        a.tags = vec!["ai".into(), "tools".into(), "dropped".into()];
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 3, 0, 1).unwrap();

        let card = Card::render(&a, false, now);
        assert_eq!(card.source_class, "ben-s-bites");
        assert_eq!(card.age, "3 hours ago");
        assert_eq!(card.tags, ["#ai", "#tools"]);
        assert_eq!(card.toggle_label(), "Save for later");
        assert_eq!(card.summary, "Summary for https://x/1");
    }

    #[test]
    fn missing_summary_uses_placeholder() {
        let mut a = article("l", "Reddit", "2025-01-01T00:00:00");
        a.summary = None;
        assert_eq!(Card::render(&a, true, Utc::now()).summary, NO_SUMMARY);

        a.summary = Some("   ".into());
        let card = Card::render(&a, true, Utc::now());
        assert_eq!(card.summary, NO_SUMMARY);
        assert_eq!(card.toggle_label(), "Remove from Saved");
    }

    #[test]
    fn unparseable_date_keeps_raw_text() {
        let a = article("l", "Reddit", "sometime");
        let card = Card::render(&a, false, Utc::now());
        assert_eq!(card.age, "unknown date");
        assert_eq!(card.published_full, "sometime");
    }
}
