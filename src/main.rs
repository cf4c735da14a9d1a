//! travel-concierge server binary.
//!
//! Wires configuration, tracing, the Domain Service backend and the chat
//! handlers into an axum server.

use std::sync::Arc;

use anyhow::Context;
use futures::join;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use travel_concierge::adapters::http::{app_router, ChatAppState, HttpOptions};
use travel_concierge::adapters::{
    InMemoryChatHistory, InMemoryInventory, RemoteInventory, RemoteInventoryConfig,
};
use travel_concierge::application::{
    ActionResolver, GetChatHistoryHandler, SendMessageConfig, SendMessageHandler,
};
use travel_concierge::config::{AppConfig, InventoryBackend, InventoryConfig};
use travel_concierge::domain::chat::{Gazetteer, ResponseComposer, RuleBasedIntentClassifier};
use travel_concierge::ports::TravelServices;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let services = build_services(&config.inventory)?;
    let gazetteer = build_gazetteer(&services).await;
    info!(
        places = gazetteer.place_count(),
        backend = ?config.inventory.backend,
        "Domain services ready"
    );

    let classifier = RuleBasedIntentClassifier::new(Arc::new(gazetteer));
    let composer = ResponseComposer::new(config.chat.max_cards, config.chat.max_list_items);
    let history = Arc::new(InMemoryChatHistory::new());

    let send_message = SendMessageHandler::new(
        Arc::new(classifier),
        ActionResolver::new(services.clone()),
        composer,
        history.clone(),
        services.trips.clone(),
    )
    .with_config(SendMessageConfig {
        history_lookback: config.chat.history_lookback,
        record_user_messages: config.chat.record_user_messages,
    });
    let get_history = GetChatHistoryHandler::new(history);

    let state = ChatAppState::new(
        Arc::new(send_message),
        Arc::new(get_history),
        services.trips.clone(),
    )
    .with_verbose_errors(config.features.verbose_errors);

    let options = HttpOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
        enable_tracing: config.features.enable_tracing,
    };
    let app = app_router(state, &options);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, environment = ?config.server.environment, "travel-concierge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over `server.log_level`.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_services(inventory: &InventoryConfig) -> anyhow::Result<TravelServices> {
    match inventory.backend {
        InventoryBackend::Mock => {
            let store = InMemoryInventory::seeded().context("failed to load seed catalog")?;
            Ok(TravelServices::from_inventory(Arc::new(store)))
        }
        InventoryBackend::Remote => {
            let base_url = inventory
                .base_url
                .clone()
                .context("inventory base URL is required for the remote backend")?;
            let mut remote = RemoteInventoryConfig::new(base_url).with_timeout(inventory.timeout());
            if let Some(key) = &inventory.api_key {
                remote = remote.with_api_key(key.expose_secret().clone());
            }
            let client = RemoteInventory::new(remote).context("failed to build inventory client")?;
            Ok(TravelServices::from_inventory(Arc::new(client)))
        }
    }
}

/// Destinations and themes for the classifier. Starts empty if the catalog is unreachable.
async fn build_gazetteer(services: &TravelServices) -> Gazetteer {
    let (destinations, themes) = join!(
        services.destinations.list(),
        services.destinations.themes()
    );

    match (destinations, themes) {
        (Ok(destinations), Ok(themes)) => Gazetteer::from_catalog(&destinations, &themes),
        (Ok(destinations), Err(e)) => {
            warn!(error = %e, "Theme catalog unavailable, starting without themes");
            Gazetteer::from_catalog(&destinations, &[])
        }
        (Err(e), _) => {
            warn!(error = %e, "Destination catalog unavailable, starting with an empty gazetteer");
            Gazetteer::default()
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
