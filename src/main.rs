use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pg_finder::config::{LoggingSettings, Settings};
use pg_finder::core::{Gazetteer, SearchPipeline};
use pg_finder::routes::{self, search::{AppState, SuggestionDefaults}};
use pg_finder::services::{BackendClient, PostgresClient, SnapshotCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over the configured level; `LOG_LEVEL` and `LOG_FORMAT`
/// override the `[logging]` section.
fn init_logging(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", level)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }
}

fn startup_error(message: String) -> std::io::Error {
    error!("{}", message);
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    // Logging is not up yet, so configuration errors go to stderr
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting PG Finder search service...");

    let backend = Arc::new(
        BackendClient::new(
            settings.backend.base_url.clone(),
            settings.backend.api_key.clone(),
            Duration::from_secs(settings.backend.timeout_secs),
        )
        .map_err(|e| startup_error(format!("Failed to create backend client: {}", e)))?,
    );

    info!("Backend client initialized ({})", settings.backend.base_url);

    let cache = Arc::new(SnapshotCache::new(
        settings.cache.snapshot_capacity,
        settings.cache.snapshot_ttl_secs,
    ));

    if cache.is_enabled() {
        info!(
            "Snapshot cache enabled ({} entries, TTL: {}s)",
            settings.cache.snapshot_capacity, settings.cache.snapshot_ttl_secs
        );
    } else {
        info!("Snapshot cache disabled, every search fetches from the backend");
    }

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
            settings.suggestions.recent_capacity,
        )
        .await
        .map_err(|e| startup_error(format!("Failed to connect to PostgreSQL: {}", e)))?,
    );

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let gazetteer = Arc::new(Gazetteer::builtin());
    let pipeline = SearchPipeline::new(settings.search.max_limit);

    info!("Search pipeline initialized (max limit: {})", settings.search.max_limit);

    let app_state = AppState {
        backend,
        cache,
        postgres,
        gazetteer: Arc::clone(&gazetteer),
        pipeline,
        college_radius_km: settings.search.college_radius_km,
    };

    let suggestion_defaults = SuggestionDefaults {
        limit: settings.suggestions.default_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::from(Arc::clone(&gazetteer)))
            .app_data(web::Data::new(suggestion_defaults))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
