use std::path::Path;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use waywise_server::cache::{CacheConfig, CachedIntentClient};
use waywise_server::catalog::{Catalog, generate, load_csv, save_csv};
use waywise_server::config::ServerConfig;
use waywise_server::intent::{IntentClient, IntentExtractor};
use waywise_server::resolve::{LocationResolver, ResolverConfig};
use waywise_server::web::{AppState, create_router};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => serve().await,
        [cmd, path] if cmd == "export" => export(Path::new(path)),
        _ => Err("usage: waywise-server [export <path.csv>]".into()),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn load_catalog(config: &ServerConfig) -> Result<Catalog, BoxError> {
    let catalog = match &config.catalog_path {
        Some(path) => load_csv(path)?,
        None => {
            let catalog = generate(config.seed)?;
            info!(seed = config.seed, rows = catalog.len(), "generated synthetic catalog");
            catalog
        }
    };
    Ok(catalog)
}

/// Write the configured catalog to `path` as CSV.
fn export(path: &Path) -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    let catalog = load_catalog(&config)?;
    save_csv(&catalog, path)?;
    info!(path = %path.display(), rows = catalog.len(), "wrote catalog");
    Ok(())
}

async fn serve() -> Result<(), BoxError> {
    let config = ServerConfig::from_env()?;
    let catalog = load_catalog(&config)?;

    let resolver = LocationResolver::new(ResolverConfig::new(config.match_threshold));

    let intent = match config.llm.clone() {
        Some(llm) => {
            info!(url = %llm.base_url, model = %llm.model, "using model intent extractor");
            let client = IntentClient::new(llm)?;
            IntentExtractor::Model(CachedIntentClient::new(client, &CacheConfig::default()))
        }
        None => {
            info!("WAYWISE_LLM_URL not set, using keyword intent extractor");
            IntentExtractor::default()
        }
    };

    let state = AppState::new(catalog, resolver, intent);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("WayWise listening on http://{}", config.addr);
    info!("API endpoints:");
    info!("  GET  /health                - Health check");
    info!("  GET  /api/locations         - Known origins and destinations");
    info!("  GET  /api/locations/search  - Location suggestions");
    info!("  GET  /recommend             - Recommend a travel mode");
    info!("  POST /api/recommend         - Recommend from a JSON query");
    info!("  POST /api/chat              - Recommend from a chat message");

    axum::serve(listener, app).await?;
    Ok(())
}
