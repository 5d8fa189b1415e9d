//! Encyclopedia article lookup via the MediaWiki Action API.

use crate::config::EncyclopediaConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Introduction of an encyclopedia article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Resolved page title (after redirects).
    pub title: String,
    /// Plain-text introduction of the article.
    pub extract: String,
    /// Canonical URL of the article.
    pub url: Option<String>,
}

impl Article {
    /// First paragraph of the introduction.
    pub fn first_paragraph(&self) -> &str {
        self.extract.split('\n').next().unwrap_or_default().trim()
    }
}

/// Source of encyclopedia articles, queried by exact page title.
pub trait ArticleSource {
    /// Fetch the article with `title`. `Ok(None)` means no such article.
    fn fetch_article(&self, title: &str) -> impl Future<Output = Result<Option<Article>>> + Send;
}

/// Wikipedia client.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    endpoint: Url,
}

impl WikipediaClient {
    /// Build a client from configuration.
    pub fn from_config(config: &EncyclopediaConfig) -> Result<Self> {
        let endpoint_str = config.endpoint();
        let endpoint = Url::parse(&endpoint_str).map_err(|e| Error::ConfigValidation {
            message: format!("invalid encyclopedia endpoint '{endpoint_str}': {e}"),
        })?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, endpoint })
    }

    fn query_url(&self, title: &str) -> Result<Url> {
        Url::parse_with_params(
            self.endpoint.as_str(),
            &[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "extracts|info"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("inprop", "url"),
                ("redirects", "1"),
                ("titles", title),
            ],
        )
        .map_err(|e| Error::EncyclopediaRequest {
            title: title.to_string(),
            source: Box::new(e),
        })
    }
}

impl ArticleSource for WikipediaClient {
    async fn fetch_article(&self, title: &str) -> Result<Option<Article>> {
        let url = self.query_url(title)?;
        debug!("Encyclopedia query: {}", url);

        let request_error = |e: reqwest::Error| Error::EncyclopediaRequest {
            title: title.to_string(),
            source: Box::new(e),
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;
        let body = response.text().await.map_err(request_error)?;

        parse_query_response(&body).map_err(|e| Error::EncyclopediaRequest {
            title: title.to_string(),
            source: Box::new(e),
        })
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    fullurl: Option<String>,
}

/// Parse a `formatversion=2` query response.
///
/// Returns `None` when the page is missing or the title is invalid.
pub fn parse_query_response(body: &str) -> std::result::Result<Option<Article>, serde_json::Error> {
    let response: QueryResponse = serde_json::from_str(body)?;

    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .filter(|p| !p.missing && !p.invalid);

    Ok(page.map(|p| Article {
        title: p.title,
        extract: p.extract.unwrap_or_default(),
        url: p.fullurl,
    }))
}
