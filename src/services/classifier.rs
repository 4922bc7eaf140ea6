//! Decides which candidate titles denote actual human beings.
//!
//! Pipeline per batch: VIP allow-list first, then the verdict cache, then
//! batched category queries for whatever is left. The category decision rule
//! itself is pure and lives in [`is_human_categories`].

use futures::future::join_all;
use std::sync::Arc;

use crate::config::rules::{
    is_vip, BIRTH_DEATH_RE, CENTURY_PERSON_HINTS, CENTURY_RE, PERSON_EXCEPTION, PERSON_NEGATIVE,
    PERSON_POSITIVE,
};
use crate::config::SearchConfig;
use crate::errors::WikiResult;
use crate::services::cache::CacheStore;
use crate::services::wikipedia::WikiApi;

pub struct HumanClassifier {
    api: Arc<dyn WikiApi>,
    store: Arc<CacheStore>,
    config: SearchConfig,
}

impl HumanClassifier {
    pub fn new(api: Arc<dyn WikiApi>, store: Arc<CacheStore>, config: SearchConfig) -> Self {
        Self { api, store, config }
    }

    /// Returns the subset of `batch` deemed human. Never returns a title
    /// absent from the input. On a stalled or failing category API, degrades
    /// to the VIPs plus a capped sample of the rest so the search keeps
    /// moving; the sampled titles are not cached as human.
    pub async fn classify(&self, batch: &[String]) -> Vec<String> {
        let (vips, rest): (Vec<String>, Vec<String>) =
            batch.iter().cloned().partition(|t| is_vip(t));

        let verified = tokio::time::timeout(
            self.config.batch_check_timeout(),
            self.classify_uncached(&rest),
        )
        .await;

        match verified {
            Ok(admitted) => {
                let mut result = vips;
                result.extend(admitted);
                result
            }
            Err(_) => {
                tracing::warn!(
                    batch = batch.len(),
                    "Category check timed out, degrading to VIPs plus a capped sample"
                );
                let mut result = vips;
                result.extend(
                    rest.into_iter()
                        .take(self.config.fallback_node_cap),
                );
                result
            }
        }
    }

    async fn classify_uncached(&self, titles: &[String]) -> Vec<String> {
        let mut admitted = Vec::new();
        let mut unknown = Vec::new();

        for title in titles {
            match self.store.verdict(title).await {
                Some(true) => admitted.push(title.clone()),
                Some(false) => {}
                None => unknown.push(title.clone()),
            }
        }

        let chunks: Vec<&[String]> = unknown
            .chunks(self.config.category_batch_size.max(1))
            .collect();
        let results = join_all(chunks.into_iter().map(|chunk| self.classify_chunk(chunk))).await;

        for result in results {
            match result {
                Ok(humans) => admitted.extend(humans),
                Err(e) => tracing::warn!("Category chunk failed, skipping: {e}"),
            }
        }

        admitted
    }

    async fn classify_chunk(&self, chunk: &[String]) -> WikiResult<Vec<String>> {
        let pages = self.api.page_categories(chunk).await?;

        let mut humans = Vec::new();
        for page in pages {
            let verdict = !page.missing && is_human_categories(&page.categories);
            self.store.store_verdict(&page.title, verdict).await;
            if verdict {
                humans.push(page.title);
            }
        }

        Ok(humans)
    }
}

/// Applies the category decision rule to one article's category list, as
/// returned by the API (e.g. `"Category:1946 births"`).
pub fn is_human_categories(categories: &[String]) -> bool {
    let clean: Vec<String> = categories
        .iter()
        .map(|c| {
            let lowered = c.to_lowercase();
            lowered
                .strip_prefix("category:")
                .map(str::to_string)
                .unwrap_or(lowered)
        })
        .collect();

    // Negative gate: technical hub pages (products, companies, media, places)
    // must not swamp the frontier. Exception keywords keep person categories
    // that merely contain an animal/tech substring alive.
    for category in &clean {
        let negative = PERSON_NEGATIVE.iter().any(|kw| category.contains(kw));
        let excepted = PERSON_EXCEPTION.iter().any(|kw| category.contains(kw));
        if negative && !excepted {
            return false;
        }
    }

    for category in &clean {
        if PERSON_POSITIVE.iter().any(|kw| category.contains(kw)) {
            return true;
        }
        if BIRTH_DEATH_RE.is_match(category) && !category.contains("animal") {
            return true;
        }
        if CENTURY_RE.is_match(category)
            && CENTURY_PERSON_HINTS.iter().any(|kw| category.contains(kw))
        {
            return true;
        }
    }

    false
}
