use futures::StreamExt;
use std::sync::Arc;

use wiki_degrees::services::wikipedia::WikiApi;
use wiki_degrees::{AppConfig, CacheStore, SearchEngine, SearchEvent, WikipediaService};

#[tokio::main]
async fn main() {
    // Load .env file if it exists (for development)
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = wiki_degrees::init_logging(&config.logging) {
        eprintln!("Logging setup failed: {e}");
    }

    let mut args = std::env::args().skip(1);
    let (Some(start), Some(end)) = (args.next(), args.next()) else {
        eprintln!("Usage: wiki-degrees <start title> <end title>");
        std::process::exit(2);
    };

    let store = Arc::new(CacheStore::load(&config.cache).await);
    let api: Arc<dyn WikiApi> = match WikipediaService::new(config.clone(), Arc::clone(&store)) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            eprintln!("Failed to set up the Wikipedia client: {e}");
            std::process::exit(1);
        }
    };

    let engine = SearchEngine::new(api, store, config);
    let mut events = engine.find_path(&start, &end);

    // One JSON record per line; the last line is the terminal event.
    let mut failed = false;
    while let Some(event) = events.next().await {
        if matches!(event, SearchEvent::Error { .. }) {
            failed = true;
        }
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::error!("Failed to serialize event: {e}"),
        }
    }

    if failed {
        std::process::exit(1);
    }
}
