use std::fmt;

use crate::model::{sort_newest_first, Article};
use crate::saved::{KvStore, SavedStore};

/// A source category selected by one of the filter buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceFilter {
    Rundown,
    Reddit,
    Bens,
    /// A tag with no substring rule. Matches every article.
    Unrecognized(String),
}

impl SourceFilter {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "rundown" => Self::Rundown,
            "reddit" => Self::Reddit,
            "bens" => Self::Bens,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Rundown => "rundown",
            Self::Reddit => "reddit",
            Self::Bens => "bens",
            Self::Unrecognized(tag) => tag,
        }
    }

    fn needles(&self) -> &'static [&'static str] {
        match self {
            Self::Rundown => &["rundown"],
            Self::Reddit => &["reddit", "r/"],
            Self::Bens => &["ben"],
            Self::Unrecognized(_) => &[],
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        let needles = self.needles();
        // Unrecognized tags fall through to "all".
        if needles.is_empty() {
            return true;
        }
        let source = article.source.to_lowercase();
        needles.iter().any(|n| source.contains(n))
    }
}

/// What the article grid is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterSelector {
    All,
    Source(SourceFilter),
    Saved,
}

impl FilterSelector {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "all" | "" => Self::All,
            "saved" => Self::Saved,
            other => Self::Source(SourceFilter::from_tag(other)),
        }
    }
}

impl fmt::Display for FilterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Source(source) => f.write_str(source.tag()),
            Self::Saved => f.write_str("saved"),
        }
    }
}

/// Articles to display for `selector`, in display order.
pub fn select<S: KvStore>(
    all: &[Article],
    saved: &SavedStore<S>,
    selector: &FilterSelector,
) -> Vec<Article> {
    match selector {
        FilterSelector::All => all.to_vec(),
        FilterSelector::Source(source) => {
            all.iter().filter(|a| source.matches(a)).cloned().collect()
        }
        FilterSelector::Saved => {
            let mut out = saved.list().to_vec();
            sort_newest_first(&mut out);
            out
        }
    }
}
