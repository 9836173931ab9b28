use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::model::Article;

/// Storage key holding the whole saved list.
pub const SAVED_KEY: &str = "savedArticles";

/// Durable string key-value storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read store file");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The user's saved articles in insertion order, written through to a
/// [`KvStore`] on every change.
#[derive(Debug)]
pub struct SavedStore<S: KvStore> {
    store: S,
    articles: Vec<Article>,
}

impl<S: KvStore> SavedStore<S> {
    /// Reads the saved list. Missing or malformed content yields an empty list.
    pub fn load(store: S) -> Self {
        let articles = match store.get(SAVED_KEY) {
            None => vec![],
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                debug!(error = %e, "saved list unreadable, starting empty");
                vec![]
            }),
        };
        Self { store, articles }
    }

    pub fn contains(&self, link: &str) -> bool {
        self.articles.iter().any(|a| a.link == link)
    }

    pub fn get(&self, link: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.link == link)
    }

    pub fn add(&mut self, article: Article) {
        if self.contains(&article.link) {
            return;
        }
        self.articles.push(article);
        self.persist();
    }

    pub fn remove(&mut self, link: &str) {
        let before = self.articles.len();
        self.articles.retain(|a| a.link != link);
        if self.articles.len() != before {
            self.persist();
        }
    }

    /// Flips membership and returns whether the article is now saved.
    pub fn toggle(&mut self, article: &Article) -> bool {
        if self.contains(&article.link) {
            self.remove(&article.link);
            false
        } else {
            self.add(article.clone());
            true
        }
    }

    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let body = match serde_json::to_string(&self.articles) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "could not serialize saved list");
                return;
            }
        };
        if let Err(e) = self.store.set(SAVED_KEY, &body) {
            warn!(error = %e, "could not persist saved list");
        }
    }
}
