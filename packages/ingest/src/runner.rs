//! Sequential batch run over the URL list.

use std::time::Instant;

use poke_loader_ingest_models::{BatchOutcome, BatchResponse};
use poke_loader_source::url_list::{self, UrlSource};

use crate::processor::ItemProcessor;

/// Runs the [`ItemProcessor`] over every URL from a [`UrlSource`], one at
/// a time, in list order.
///
/// Only a URL list that cannot be loaded ends a run early. Every per-item
/// failure is absorbed into the failure count.
pub struct BatchRunner {
    processor: ItemProcessor,
    urls: Box<dyn UrlSource>,
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("processor", &self.processor)
            .field("urls", &self.urls.describe())
            .finish()
    }
}

impl BatchRunner {
    /// Creates a runner that feeds URLs from `urls` into `processor`.
    #[must_use]
    pub fn new(processor: ItemProcessor, urls: Box<dyn UrlSource>) -> Self {
        Self { processor, urls }
    }

    /// Executes one batch run and returns the response for the trigger.
    ///
    /// Status is 500 with a fixed message when the URL list cannot be
    /// loaded (no fetches or writes happen), otherwise 200 with a summary
    /// of successes and failures.
    pub async fn run(&self) -> BatchResponse {
        log::info!(
            "Starting Pokémon load from {}...",
            self.urls.describe()
        );

        let entries = match self.urls.load().await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!(
                    "Failed to load URL list from {}: {e}",
                    self.urls.describe()
                );
                return BatchResponse::url_list_unavailable();
            }
        };

        let urls = url_list::non_blank(entries);
        let outcome = self.process_all(&urls).await;

        let response = BatchResponse::completed(outcome);
        log::info!("{}", response.message);
        response
    }

    /// Processes `urls` in order and tallies the results.
    async fn process_all(&self, urls: &[String]) -> BatchOutcome {
        let start = Instant::now();
        let total = urls.len();
        let mut outcome = BatchOutcome::default();

        for (i, url) in urls.iter().enumerate() {
            log::debug!("[{}/{total}] {url}", i + 1);
            outcome.record(self.processor.process(url).await);
        }

        log::debug!(
            "Processed {total} URL(s) in {:.1}s",
            start.elapsed().as_secs_f64()
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use poke_loader_database::DocumentStore;
    use poke_loader_database::memory::MemoryStore;
    use poke_loader_ingest_models::URL_LIST_UNAVAILABLE_MESSAGE;
    use poke_loader_source::SourceError;
    use poke_loader_source::fetch;
    use poke_loader_source::url_list::{FileUrlSource, StaticUrlSource};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// URL source that is never available.
    struct UnavailableUrls;

    #[async_trait]
    impl UrlSource for UnavailableUrls {
        fn describe(&self) -> String {
            "unavailable".to_string()
        }

        async fn load(&self) -> Result<Vec<String>, SourceError> {
            Err(SourceError::Io(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            )))
        }
    }

    fn runner(store: Arc<MemoryStore>, timeout: Duration, urls: Box<dyn UrlSource>) -> BatchRunner {
        let client = fetch::build_client(timeout).unwrap();
        BatchRunner::new(ItemProcessor::new(client, store, "pokemons"), urls)
    }

    async fn mount_pokemon(server: &MockServer, id: i64, name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/pokemon/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "name": name,
                "height": 7,
                "weight": 69,
                "types": [{ "type": { "name": "grass" } }, { "type": { "name": "poison" } }],
                "moves": [{}, {}, {}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn single_url_scenario() {
        let server = MockServer::start().await;
        mount_pokemon(&server, 1, "bulbasaur").await;

        let store = Arc::new(MemoryStore::new());
        let urls = StaticUrlSource::new([format!("{}/pokemon/1", server.uri())]);
        let runner = runner(store.clone(), fetch::DEFAULT_TIMEOUT, Box::new(urls));

        let response = runner.run().await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.message,
            "Processo finalizado. 1 Pokémons salvos, 0 falhas."
        );
        assert_eq!(
            store.get("pokemons", "1").await.unwrap(),
            Some(json!({
                "id": 1,
                "name": "bulbasaur",
                "height": 7,
                "weight": 69,
                "types": ["grass", "poison"],
                "moves_count": 3
            }))
        );
    }

    #[tokio::test]
    async fn counts_failures_without_stopping() {
        let server = MockServer::start().await;
        mount_pokemon(&server, 1, "bulbasaur").await;
        mount_pokemon(&server, 4, "charmander").await;
        Mock::given(method("GET"))
            .and(path("/pokemon/500"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pokemon/bad"))
            .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
            .mount(&server)
            .await;

        let base = server.uri();
        let urls = StaticUrlSource::new([
            format!("{base}/pokemon/500"),
            format!("{base}/pokemon/1"),
            String::new(),
            format!("{base}/pokemon/bad"),
            "   ".to_string(),
            format!("{base}/pokemon/4"),
        ]);

        let store = Arc::new(MemoryStore::new());
        let runner = runner(store.clone(), fetch::DEFAULT_TIMEOUT, Box::new(urls));

        let response = runner.run().await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.outcome,
            Some(BatchOutcome {
                successes: 2,
                failures: 2
            })
        );
        assert_eq!(
            response.message,
            "Processo finalizado. 2 Pokémons salvos, 2 falhas."
        );
        assert_eq!(store.count("pokemons").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn timeout_and_success_scenario() {
        let server = MockServer::start().await;
        mount_pokemon(&server, 1, "bulbasaur").await;
        Mock::given(method("GET"))
            .and(path("/pokemon/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": 2 }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let base = server.uri();
        let urls = StaticUrlSource::new([
            format!("{base}/pokemon/slow"),
            format!("{base}/pokemon/1"),
        ]);

        let store = Arc::new(MemoryStore::new());
        let runner = runner(store.clone(), Duration::from_millis(200), Box::new(urls));

        let response = runner.run().await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.message,
            "Processo finalizado. 1 Pokémons salvos, 1 falhas."
        );
        assert_eq!(store.get("pokemons", "2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unavailable_url_list_is_500_with_no_work() {
        let server = MockServer::start().await;
        mount_pokemon(&server, 1, "bulbasaur").await;

        let store = Arc::new(MemoryStore::new());
        let runner = runner(
            store.clone(),
            fetch::DEFAULT_TIMEOUT,
            Box::new(UnavailableUrls),
        );

        let response = runner.run().await;

        assert_eq!(response.status, 500);
        assert_eq!(response.message, URL_LIST_UNAVAILABLE_MESSAGE);
        assert_eq!(store.writes(), 0);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_url_file_is_500() {
        let path = std::env::temp_dir().join("poke_loader_runner_missing_urls.txt");
        let _ = std::fs::remove_file(&path);

        let store = Arc::new(MemoryStore::new());
        let runner = runner(
            store.clone(),
            fetch::DEFAULT_TIMEOUT,
            Box::new(FileUrlSource::new(&path)),
        );

        let response = runner.run().await;

        assert_eq!(response.status, 500);
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn empty_list_completes_with_zero_counts() {
        let store = Arc::new(MemoryStore::new());
        let runner = runner(
            store,
            fetch::DEFAULT_TIMEOUT,
            Box::new(StaticUrlSource::new(["", "  "])),
        );

        let response = runner.run().await;

        assert_eq!(response.status, 200);
        assert_eq!(
            response.message,
            "Processo finalizado. 0 Pokémons salvos, 0 falhas."
        );
    }

    #[tokio::test]
    async fn processes_urls_in_list_order() {
        let server = MockServer::start().await;
        for (id, name) in [(3, "venusaur"), (1, "bulbasaur"), (2, "ivysaur")] {
            mount_pokemon(&server, id, name).await;
        }

        let base = server.uri();
        let urls = StaticUrlSource::new([
            format!("{base}/pokemon/3"),
            format!("{base}/pokemon/1"),
            format!("{base}/pokemon/2"),
        ]);

        let store = Arc::new(MemoryStore::new());
        let runner = runner(store, fetch::DEFAULT_TIMEOUT, Box::new(urls));
        runner.run().await;

        let paths: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(paths, vec!["/pokemon/3", "/pokemon/1", "/pokemon/2"]);
    }
}
