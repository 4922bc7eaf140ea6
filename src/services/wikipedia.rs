use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

use crate::config::AppConfig;
use crate::errors::{WikiError, WikiResult};
use crate::models::{
    BacklinksResponse, CategoryQuery, CategoryResponse, PageCategories, PageData,
    PageDataResponse,
};
use crate::services::cache::CacheStore;
use crate::utils::heuristics;

/// The slice of the Wikipedia Action API the engine consumes. The search
/// itself only talks to this trait, so tests can substitute a canned
/// implementation.
#[async_trait]
pub trait WikiApi: Send + Sync {
    /// Lead extract and outgoing mainspace links for one article.
    async fn page_data(&self, title: &str) -> WikiResult<PageData>;

    /// Mainspace titles linking to the article. Single batch, best-effort.
    async fn backlinks(&self, title: &str) -> WikiResult<Vec<String>>;

    /// Category membership for a batch of titles, redirects resolved.
    async fn page_categories(&self, titles: &[String]) -> WikiResult<Vec<PageCategories>>;
}

pub struct WikipediaService {
    client: reqwest::Client,
    api_url: Url,
    config: AppConfig,
    store: Arc<CacheStore>,
    /// Bounds in-flight HTTP requests process-wide; every outbound call
    /// below takes one permit.
    semaphore: Semaphore,
}

impl WikipediaService {
    pub fn new(config: AppConfig, store: Arc<CacheStore>) -> WikiResult<Self> {
        let api_url = Url::parse(&config.wikipedia.api_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(&config.wikipedia.user_agent)
            .build()
            .map_err(|e| WikiError::internal(format!("Failed to create HTTP client: {e}")))?;

        let semaphore = Semaphore::new(config.search.concurrent_requests);

        Ok(Self {
            client,
            api_url,
            config,
            store,
            semaphore,
        })
    }

    async fn api_get<T: serde::de::DeserializeOwned>(&self, params: &[(&str, &str)]) -> WikiResult<T> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| WikiError::internal("request semaphore closed"))?;

        let response = self
            .client
            .get(self.api_url.clone())
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WikiError::Network(response.error_for_status().unwrap_err()));
        }

        Ok(response.json().await?)
    }

    /// Paginated extract+links fetch with an early exit: stop following
    /// continuation tokens once enough heuristically admissible links have
    /// accumulated. BFS needs some good children per node, not all of them,
    /// and hub articles can run to thousands of links.
    async fn fetch_page_data(&self, title: &str) -> WikiResult<PageData> {
        let mut data = PageData::default();
        let mut plcontinue: Option<String> = None;

        for _ in 0..self.config.search.max_fetch_batches {
            let mut params = vec![
                ("action", "query"),
                ("format", "json"),
                ("titles", title),
                ("redirects", "1"),
                ("prop", "extracts|links"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
            ];
            if let Some(token) = plcontinue.as_deref() {
                params.push(("plcontinue", token));
            }

            let response: PageDataResponse = self.api_get(&params).await?;

            if let Some(query) = response.query {
                for page in query.pages.into_values() {
                    if page.missing.is_some() {
                        continue;
                    }
                    if data.extract.is_empty() {
                        if let Some(extract) = page.extract {
                            data.extract = extract;
                        }
                    }
                    if let Some(links) = page.links {
                        data.links.extend(links.into_iter().map(|l| l.title));
                    }
                }
            }

            let next = response.continuation.and_then(|c| c.plcontinue);
            let admissible = heuristics::filter_candidates(&data.links).len();
            match next {
                Some(token) if admissible < self.config.search.min_humans_for_early_exit => {
                    plcontinue = Some(token);
                }
                Some(_) => {
                    tracing::debug!(
                        title,
                        admissible,
                        "Stopping link pagination early, enough candidates"
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(data)
    }

    async fn fetch_backlinks(&self, title: &str) -> WikiResult<Vec<String>> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "backlinks"),
            ("bltitle", title),
            ("blnamespace", "0"),
            ("bllimit", "max"),
        ];

        let response: BacklinksResponse = self.api_get(&params).await?;

        Ok(response
            .query
            .map(|q| q.backlinks.into_iter().map(|l| l.title).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl WikiApi for WikipediaService {
    async fn page_data(&self, title: &str) -> WikiResult<PageData> {
        if let Some(cached) = self.store.page(title).await {
            return Ok(cached.as_ref().clone());
        }

        match self.fetch_page_data(title).await {
            Ok(data) => {
                self.store.store_page(title, data.clone()).await;
                Ok(data)
            }
            Err(e) => {
                tracing::warn!(title, "Page data fetch failed, treating as empty: {e}");
                Ok(PageData::default())
            }
        }
    }

    async fn backlinks(&self, title: &str) -> WikiResult<Vec<String>> {
        if let Some(cached) = self.store.backlinks(title).await {
            return Ok(cached.as_ref().clone());
        }

        match self.fetch_backlinks(title).await {
            Ok(links) => {
                self.store.store_backlinks(title, links.clone()).await;
                Ok(links)
            }
            Err(e) => {
                tracing::warn!(title, "Backlinks fetch failed, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    async fn page_categories(&self, titles: &[String]) -> WikiResult<Vec<PageCategories>> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let joined = titles.join("|");
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", joined.as_str()),
            ("prop", "categories"),
            ("cllimit", "max"),
            ("redirects", "1"),
        ];

        let response: CategoryResponse = self.api_get(&params).await?;

        Ok(match response.query {
            Some(query) => map_requested_titles(titles, &query),
            None => titles
                .iter()
                .map(|t| PageCategories {
                    title: t.clone(),
                    missing: true,
                    categories: Vec::new(),
                })
                .collect(),
        })
    }
}

/// Maps each requested title through the response's `normalized` and
/// `redirects` tables to the page it landed on, so callers always get back
/// the titles they asked for.
fn map_requested_titles(titles: &[String], query: &CategoryQuery) -> Vec<PageCategories> {
    let normalized: HashMap<&str, &str> = query
        .normalized
        .iter()
        .map(|m| (m.from.as_str(), m.to.as_str()))
        .collect();
    let redirects: HashMap<&str, &str> = query
        .redirects
        .iter()
        .map(|m| (m.from.as_str(), m.to.as_str()))
        .collect();
    let by_title: HashMap<&str, &crate::models::CategoryPage> = query
        .pages
        .values()
        .map(|p| (p.title.as_str(), p))
        .collect();

    titles
        .iter()
        .map(|requested| {
            let mut resolved = requested.as_str();
            if let Some(to) = normalized.get(resolved) {
                resolved = to;
            }
            if let Some(to) = redirects.get(resolved) {
                resolved = to;
            }

            match by_title.get(resolved) {
                Some(page) if page.missing.is_none() => PageCategories {
                    title: requested.clone(),
                    missing: false,
                    categories: page
                        .categories
                        .iter()
                        .flatten()
                        .map(|c| c.title.clone())
                        .collect(),
                },
                _ => PageCategories {
                    title: requested.clone(),
                    missing: true,
                    categories: Vec::new(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    async fn test_store() -> Arc<CacheStore> {
        let dir = tempfile::tempdir().unwrap();
        Arc::new(
            CacheStore::load(&CacheConfig {
                data_dir: dir.path().to_path_buf(),
                max_capacity: 100,
            })
            .await,
        )
    }

    #[tokio::test]
    async fn test_rejects_invalid_api_url() {
        let mut config = AppConfig::default();
        config.wikipedia.api_url = "not a url".to_string();

        assert!(WikipediaService::new(config, test_store().await).is_err());
    }

    #[tokio::test]
    async fn test_accepts_default_config() {
        assert!(WikipediaService::new(AppConfig::default(), test_store().await).is_ok());
    }

    #[test]
    fn test_map_requested_titles_resolves_redirect_chain() {
        let payload = r#"{
            "normalized": [{"from": "obama", "to": "Obama"}],
            "redirects": [{"from": "Obama", "to": "Barack Obama"}],
            "pages": {
                "534366": {
                    "title": "Barack Obama",
                    "categories": [{"title": "Category:Living people"}]
                }
            }
        }"#;
        let query: CategoryQuery = serde_json::from_str(payload).unwrap();

        let mapped = map_requested_titles(&["obama".to_string()], &query);

        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].title, "obama");
        assert!(!mapped[0].missing);
        assert_eq!(mapped[0].categories, vec!["Category:Living people"]);
    }

    #[test]
    fn test_map_requested_titles_marks_absent_pages_missing() {
        let payload = r#"{
            "pages": {
                "-1": {"title": "No Such Page", "missing": ""}
            }
        }"#;
        let query: CategoryQuery = serde_json::from_str(payload).unwrap();

        let mapped = map_requested_titles(
            &["No Such Page".to_string(), "Never Returned".to_string()],
            &query,
        );

        assert!(mapped[0].missing);
        assert!(mapped[1].missing);
        assert_eq!(mapped[1].title, "Never Returned");
    }
}
