use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use trainsched_app::app::api::routes;
use trainsched_app::config::ConfigHandler;
use trainsched_app::service_handler::CalendarServiceHandler;
use trainsched_core::config::load_config;
use trainsched_service::calendar::CalendarService;
use trainsched_service::memory::InMemoryEventRepository;
use trainsched_service::repository::EventRepository;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting training schedule server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let repo: Arc<dyn EventRepository> = match &config.storage.snapshot_path {
        Some(path) => Arc::new(InMemoryEventRepository::open(path).await?),
        None => {
            tracing::warn!("No snapshot path configured, events are kept in memory only");
            Arc::new(InMemoryEventRepository::new())
        }
    };
    let calendar = CalendarService::new(repo);

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(CalendarServiceHandler { service: calendar })
        .push(routes()?);

    tracing::info!(origin = %config.server.origin(), "Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
