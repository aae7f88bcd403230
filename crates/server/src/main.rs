use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk_core::{
    load_config, validate_config, Config, Dataset, IntentResolver, OpenAiResolver,
    ResolverConfig,
};
use ticketdesk_server::{create_router, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("TICKETDESK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let mut config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    apply_api_key_fallback(&mut config, std::env::var("OPENAI_API_KEY").ok());

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Dataset path: {:?}", config.dataset.path);

    // Load the dataset once; it is read-only from here on
    let dataset = Dataset::load(&config.dataset.path)
        .with_context(|| format!("Failed to load dataset from {:?}", config.dataset.path))?;
    info!("Dataset loaded: {} tickets", dataset.len());

    // Create intent resolver if configured
    let resolver: Option<Arc<dyn IntentResolver>> = match &config.resolver {
        Some(resolver_config) => match OpenAiResolver::new(resolver_config) {
            Ok(resolver) => {
                info!("Intent resolver initialized (model: {})", resolver.model());
                Some(Arc::new(resolver))
            }
            Err(e) => {
                warn!("Intent resolver unavailable: {}; /chat is disabled", e);
                None
            }
        },
        None => {
            info!("No intent resolver configured; /chat is disabled");
            None
        }
    };

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create application state
    let state = Arc::new(AppState::new(config, Arc::new(dataset), resolver));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Fill a missing resolver API key from `OPENAI_API_KEY`.
///
/// A key in the environment enables the resolver with default settings
/// when the config has no `[resolver]` section.
fn apply_api_key_fallback(config: &mut Config, env_key: Option<String>) {
    let Some(key) = env_key.filter(|k| !k.trim().is_empty()) else {
        return;
    };

    let resolver = config.resolver.get_or_insert_with(ResolverConfig::default);
    if resolver.api_key.as_deref().is_none_or(str::is_empty) {
        resolver.api_key = Some(key);
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_fills_missing_key() {
        let mut config = Config {
            resolver: Some(ResolverConfig::default()),
            ..Config::default()
        };
        apply_api_key_fallback(&mut config, Some("sk-env".to_string()));
        assert_eq!(
            config.resolver.unwrap().api_key.as_deref(),
            Some("sk-env")
        );
    }

    #[test]
    fn test_config_key_wins() {
        let mut config = Config {
            resolver: Some(ResolverConfig {
                api_key: Some("sk-file".to_string()),
                ..ResolverConfig::default()
            }),
            ..Config::default()
        };
        apply_api_key_fallback(&mut config, Some("sk-env".to_string()));
        assert_eq!(
            config.resolver.unwrap().api_key.as_deref(),
            Some("sk-file")
        );
    }

    #[test]
    fn test_env_key_enables_resolver() {
        let mut config = Config::default();
        apply_api_key_fallback(&mut config, Some("sk-env".to_string()));
        assert_eq!(config.resolver.unwrap().model, "gpt-4o-mini");

        let mut config = Config::default();
        apply_api_key_fallback(&mut config, None);
        assert!(config.resolver.is_none());
    }
}
