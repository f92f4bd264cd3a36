use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_server::cache::{WaitCacheConfig, WaitTimeCache};
use triage_server::config::{RegistrySetting, ServerConfig};
use triage_server::registry::{
    FacilityRegistry, RegistryClient, RegistryClientConfig, RegistrySource,
};
use triage_server::triage::TriageConfig;
use triage_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });

    let source = match &config.registry {
        RegistrySetting::Seed => RegistrySource::Seed,
        RegistrySetting::File(path) => RegistrySource::File(path.clone()),
        RegistrySetting::Http { url, api_key } => {
            let mut client_config = RegistryClientConfig::new(url);
            if let Some(key) = api_key {
                client_config = client_config.with_api_key(key);
            }
            let client =
                RegistryClient::new(client_config).expect("Failed to create registry client");
            RegistrySource::Http(client)
        }
    };

    // Load facilities (fail fast if unavailable)
    info!(source = ?config.registry, "Loading facilities...");
    let registry = FacilityRegistry::load(source)
        .await
        .expect("Failed to load facility registry");
    info!("Loaded {} facilities", registry.len().await);

    // Spawn background task to refresh the registry
    let registry_refresh = registry.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match registry_refresh.refresh().await {
                Ok(count) => info!("Refreshed facilities: {} facilities", count),
                Err(e) => warn!("Failed to refresh facilities: {}", e),
            }
        }
    });

    let wait_times = WaitTimeCache::new(&WaitCacheConfig::default());
    let state = AppState::new(registry, wait_times, TriageConfig::default());

    let app = create_router(state, &config.static_dir);

    let addr = config.bind;
    info!("Triage server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health      - Health check");
    info!("  POST /hospitals   - Nearby facilities");
    info!("  POST /waittimes   - Estimate wait times");
    info!("  POST /rank        - Rank facilities by severity");
    info!("  POST /recommend   - Nearby, estimated and ranked");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
