#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web HTTP trigger for the Pokémon batch loader.
//!
//! A scheduler hits `/` to start a run; the response carries the
//! plain-text summary and the run's status code. The document store is
//! opened once at startup and shared by every run the process serves.

mod handlers;

use actix_web::{App, HttpServer, middleware, web};
use poke_loader_ingest::config::IngestConfig;
use poke_loader_ingest::runner::BatchRunner;
use poke_loader_ingest::{open_store, runner_from_config};

pub use handlers::ApiHealth;

/// Shared application state.
pub struct AppState {
    /// Runner invoked by each trigger request.
    pub runner: BatchRunner,
}

/// Registers the trigger and health routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::trigger))
        .route("/", web::post().to(handlers::trigger))
        .service(web::scope("/api").route("/health", web::get().to(handlers::health)));
}

/// Starts the loader's HTTP server.
///
/// Reads [`IngestConfig`] from the environment, opens the document store,
/// and serves on `BIND_ADDR:PORT` (default `127.0.0.1:8080`). The caller
/// provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the document store cannot be
/// opened, the HTTP client cannot be built, or the server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = IngestConfig::from_env();

    log::info!("Opening document store at {}...", config.db_path.display());
    let store = open_store(&config).await.map_err(std::io::Error::other)?;

    let runner = runner_from_config(&config, store).map_err(std::io::Error::other)?;
    log::info!(
        "Serving URL list {} into collection '{}'",
        config.urls_file.display(),
        config.collection
    );

    let state = web::Data::new(AppState { runner });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use poke_loader_database::DocumentStore;
    use poke_loader_database::memory::MemoryStore;
    use poke_loader_ingest::processor::ItemProcessor;
    use poke_loader_source::fetch;
    use poke_loader_source::url_list::{FileUrlSource, StaticUrlSource, UrlSource};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state(store: Arc<MemoryStore>, urls: Box<dyn UrlSource>) -> web::Data<AppState> {
        let client = fetch::build_client(fetch::DEFAULT_TIMEOUT).unwrap();
        let processor = ItemProcessor::new(client, store, "pokemons");
        web::Data::new(AppState {
            runner: BatchRunner::new(processor, urls),
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let store = Arc::new(MemoryStore::new());
        let app = test::init_service(
            App::new()
                .app_data(state(store, Box::new(StaticUrlSource::default())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: ApiHealth = test::call_and_read_body_json(&app, req).await;

        assert!(health.healthy);
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn trigger_runs_batch_and_returns_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "name": "bulbasaur",
                "height": 7,
                "weight": 69,
                "types": [{ "type": { "name": "grass" } }, { "type": { "name": "poison" } }],
                "moves": [{}, {}, {}]
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let urls = StaticUrlSource::new([format!("{}/pokemon/1", server.uri())]);
        let app = test::init_service(
            App::new()
                .app_data(state(store.clone(), Box::new(urls)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body = test::read_body(resp).await;
        assert_eq!(
            body.as_ref(),
            "Processo finalizado. 1 Pokémons salvos, 0 falhas.".as_bytes()
        );
        assert!(store.get("pokemons", "1").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn trigger_without_url_list_is_500() {
        let missing = std::env::temp_dir().join("poke_loader_server_missing_urls.txt");
        let _ = std::fs::remove_file(&missing);

        let store = Arc::new(MemoryStore::new());
        let app = test::init_service(
            App::new()
                .app_data(state(store.clone(), Box::new(FileUrlSource::new(&missing))))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 500);

        let body = test::read_body(resp).await;
        assert_eq!(
            body.as_ref(),
            poke_loader_ingest_models::URL_LIST_UNAVAILABLE_MESSAGE.as_bytes()
        );
        assert_eq!(store.writes(), 0);
    }
}
