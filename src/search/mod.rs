//! The bidirectional search: two BFS frontiers walking toward each other,
//! always expanding the smaller one, with every admitted interior node
//! vetted as a human being.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

pub mod frontier;
pub mod processor;

use crate::config::AppConfig;
use crate::models::{Direction, SearchEvent, SearchStats};
use crate::services::cache::CacheStore;
use crate::services::classifier::HumanClassifier;
use crate::services::wikipedia::WikiApi;
use frontier::{reconstruct_path, Frontier};
use processor::process_node;

/// Long searches persist the caches mid-flight so a killed process keeps
/// most of its work.
const FLUSH_EVERY_STEPS: u32 = 25;

pub struct SearchEngine {
    api: Arc<dyn WikiApi>,
    store: Arc<CacheStore>,
    classifier: Arc<HumanClassifier>,
    config: Arc<AppConfig>,
    seed: u64,
}

impl SearchEngine {
    pub fn new(api: Arc<dyn WikiApi>, store: Arc<CacheStore>, config: AppConfig) -> Self {
        let classifier = Arc::new(HumanClassifier::new(
            Arc::clone(&api),
            Arc::clone(&store),
            config.search.clone(),
        ));

        Self {
            api,
            store,
            classifier,
            config: Arc::new(config),
            seed: rand::random(),
        }
    }

    /// Fixes the shuffle seed, making the event stream reproducible for
    /// identical API responses.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Starts a search and returns its event stream. The stream is finite
    /// and ends with exactly one terminal event (`finished`, `not_found` or
    /// `error`), no later than the hard time limit: the whole run is wrapped
    /// in a watchdog timeout that abandons the search and discards any
    /// in-flight results if the inner loop ever stalls.
    pub fn find_path(
        &self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> UnboundedReceiver<SearchEvent> {
        let (tx, rx) = mpsc::unbounded();

        let api = Arc::clone(&self.api);
        let classifier = Arc::clone(&self.classifier);
        let store = Arc::clone(&self.store);
        let config = Arc::clone(&self.config);
        let seed = self.seed;
        let start = start.into();
        let end = end.into();

        tokio::spawn(async move {
            let hard_timeout = config.search.hard_timeout();
            let run = SearchRun {
                api,
                classifier,
                store: Arc::clone(&store),
                config: Arc::clone(&config),
                seed,
            };

            let terminal = match tokio::time::timeout(hard_timeout, run.run(&start, &end, &tx)).await
            {
                Ok(event) => event,
                Err(_) => {
                    tracing::warn!(%start, %end, "Watchdog fired, abandoning search");
                    SearchEvent::error(format!(
                        "Search aborted: hard time limit of {}s reached",
                        config.search.hard_timeout_secs
                    ))
                }
            };

            let _ = tx.unbounded_send(terminal);

            if let Err(e) = store.flush().await {
                tracing::warn!("Cache flush failed: {e}");
            }
        });

        rx
    }
}

/// Per-search state: the step and time counters live here, not in globals.
struct SearchRun {
    api: Arc<dyn WikiApi>,
    classifier: Arc<HumanClassifier>,
    store: Arc<CacheStore>,
    config: Arc<AppConfig>,
    seed: u64,
}

impl SearchRun {
    /// The inner loop. Emits progress events on `tx` and returns the
    /// terminal event; the caller is responsible for sending it.
    async fn run(&self, start: &str, end: &str, tx: &UnboundedSender<SearchEvent>) -> SearchEvent {
        if start == end {
            return SearchEvent::Finished {
                path: vec![start.to_string()],
            };
        }

        let search = &self.config.search;
        let mut forward = Frontier::new(start);
        let mut backward = Frontier::new(end);

        if !emit(
            tx,
            SearchEvent::info(format!("Initializing search from '{start}' to '{end}'")),
        ) {
            return SearchEvent::error("event consumer disconnected");
        }

        let started = Instant::now();
        let soft_deadline = search.soft_timeout();
        let mut steps: u32 = 0;

        while !forward.is_exhausted() && !backward.is_exhausted() {
            let visited = forward.visited_len() + backward.visited_len();

            if started.elapsed() >= soft_deadline {
                return SearchEvent::error(format!(
                    "Search timed out after {:.1}s",
                    started.elapsed().as_secs_f64()
                ));
            }
            if visited > search.max_nodes_visited {
                return SearchEvent::error(format!(
                    "Search aborted: more than {} nodes visited",
                    search.max_nodes_visited
                ));
            }
            if steps > search.max_step_count {
                return SearchEvent::error(format!(
                    "Search aborted: exceeded {} expansion steps",
                    search.max_step_count
                ));
            }
            steps += 1;

            // Always expand the smaller wavefront.
            let direction = if forward.queue_len() <= backward.queue_len() {
                Direction::Forward
            } else {
                Direction::Backward
            };
            let (own, other) = match direction {
                Direction::Forward => (&mut forward, &mut backward),
                Direction::Backward => (&mut backward, &mut forward),
            };

            let level_nodes = own.pop_batch(search.batch_size);

            if !emit(
                tx,
                SearchEvent::Exploring {
                    direction,
                    nodes: level_nodes.clone(),
                    stats: SearchStats {
                        visited,
                        elapsed_seconds: started.elapsed().as_secs_f64(),
                    },
                },
            ) {
                return SearchEvent::error("event consumer disconnected");
            }

            let results = join_all(level_nodes.iter().map(|node| {
                process_node(
                    &self.api,
                    &self.classifier,
                    search,
                    node,
                    direction,
                    self.seed,
                )
            }))
            .await;

            for processed in results.into_iter().flatten() {
                for child in &processed.children {
                    if !own.insert(child, &processed.node) {
                        continue;
                    }

                    if other.contains(child) {
                        let path = match direction {
                            Direction::Forward => reconstruct_path(own, other, child),
                            Direction::Backward => reconstruct_path(other, own, child),
                        };
                        return SearchEvent::Finished { path };
                    }
                }
            }

            if steps % FLUSH_EVERY_STEPS == 0 {
                if let Err(e) = self.store.flush().await {
                    tracing::warn!("Periodic cache flush failed: {e}");
                }
            }
        }

        SearchEvent::not_found("No path found.")
    }
}

fn emit(tx: &UnboundedSender<SearchEvent>, event: SearchEvent) -> bool {
    tx.unbounded_send(event).is_ok()
}
