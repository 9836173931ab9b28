use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::model::{sort_newest_first, Article};

pub const ARTICLES_PATH: &str = "/api/articles";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response has no `articles` field")]
    MissingArticles,
}

/// How a failed load should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    FetchFailed,
    EmptyResult,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingArticles => FailureKind::EmptyResult,
            _ => FailureKind::FetchFailed,
        }
    }
}

/// Decodes a backend body and orders it newest first.
///
/// Any JSON value without a non-null `articles` member, including arrays and
/// scalars, is [`FetchError::MissingArticles`].
pub fn parse_articles(body: &[u8]) -> Result<Vec<Article>, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    let articles = match value {
        Value::Object(mut map) => map.remove("articles"),
        _ => None,
    };
    let articles = match articles {
        None | Some(Value::Null) => return Err(FetchError::MissingArticles),
        Some(articles) => articles,
    };
    let mut articles: Vec<Article> = serde_json::from_value(articles)?;
    // The backend already sorts; re-sort so ordering never depends on it.
    sort_newest_first(&mut articles);
    Ok(articles)
}

#[derive(Clone, Debug)]
pub struct ArticleRepository {
    client: Client,
    endpoint: String,
}

impl ArticleRepository {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder().user_agent("newsdash/0.1 (Rust; TUI)");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ARTICLES_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_all(&self) -> Result<Vec<Article>, FetchError> {
        debug!(endpoint = %self.endpoint, "fetching articles");

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            // Error bodies are still classified by their content.
            warn!(%status, "backend answered with an error status");
        }
        let bytes = response.bytes().await?;

        let articles = parse_articles(&bytes)?;
        info!(count = articles.len(), "articles loaded");
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a random port and returns the base URL.
    async fn one_shot_backend(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn parse_sorts_newest_first() {
        let body = br#"{"articles":[
            {"title":"a","link":"a","published":"2025-01-01T00:00:00","source":"Reddit"},
            {"title":"b","link":"b","published":"2025-02-01T00:00:00","source":"Reddit"}
        ]}"#;
        let links: Vec<_> = parse_articles(body).unwrap().into_iter().map(|a| a.link).collect();
        assert_eq!(links, ["b", "a"]);
    }

    #[test]
    fn empty_list_is_success_but_missing_field_is_empty_result() {
        assert!(parse_articles(br#"{"articles":[]}"#).unwrap().is_empty());

        let err = parse_articles(br#"{"detail":"boom"}"#).unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyResult);

        let err = parse_articles(b"<html>").unwrap_err();
        assert_eq!(err.kind(), FailureKind::FetchFailed);
    }

    #[test]
    fn non_object_bodies_have_no_article_list() {
        let bodies: [&[u8]; 5] = [b"[]", b"\"oops\"", b"42", b"null", br#"{"articles":null}"#];
        for body in bodies {
            let err = parse_articles(body).unwrap_err();
            assert!(matches!(err, FetchError::MissingArticles), "{err:?}");
        }

        let nested = br#"[[{"title":"t","link":"l","published":"2025-01-01T00:00:00","source":"Reddit"}]]"#;
        assert_eq!(parse_articles(nested).unwrap_err().kind(), FailureKind::EmptyResult);
    }

    #[test]
    fn malformed_article_entries_fail_the_load() {
        let err = parse_articles(br#"{"articles":[{"title":"no link"}]}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.kind(), FailureKind::FetchFailed);
    }

    #[tokio::test]
    async fn fetches_from_backend() {
        let base = one_shot_backend(
            "200 OK",
            r#"{"articles":[{"title":"t","link":"https://x/1","published":"2025-01-01T00:00:00","source":"The Rundown AI","tags":["ai","news","extra"]}]}"#,
        )
        .await;
        let repo = ArticleRepository::new(&format!("{base}/"), None).unwrap();
        assert_eq!(repo.endpoint(), format!("{base}/api/articles"));

        let articles = repo.fetch_all().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].tags.len(), 3);
    }

    #[tokio::test]
    async fn server_error_with_json_detail_is_empty_result() {
        let base = one_shot_backend("500 Internal Server Error", r#"{"detail":"x"}"#).await;
        let repo = ArticleRepository::new(&base, None).unwrap();

        let err = repo.fetch_all().await.unwrap_err();
        assert!(matches!(err, FetchError::MissingArticles));
        assert_eq!(err.kind(), FailureKind::EmptyResult);
    }

    #[tokio::test]
    async fn server_error_with_html_body_is_fetch_failed() {
        let base = one_shot_backend("502 Bad Gateway", "<html>bad gateway</html>").await;
        let repo = ArticleRepository::new(&base, None).unwrap();

        let err = repo.fetch_all().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::FetchFailed);
    }

    #[tokio::test]
    async fn unreachable_backend_is_fetch_failed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let repo = ArticleRepository::new(&format!("http://{addr}"), None).unwrap();
        let err = repo.fetch_all().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::FetchFailed);
    }
}
