use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use coaching_core::adapters::clock::SystemClock;
use coaching_core::adapters::commitment::InMemoryCommitmentRepository;
use coaching_core::adapters::http::{app_router, AppState};
use coaching_core::adapters::notifications::TracingReminderDispatcher;
use coaching_core::adapters::throttle::{InMemoryThrottleStore, ThrottleReaper, ThrottleReaperConfig};
use coaching_core::application::ThrottleLedger;
use coaching_core::config::AppConfig;
use coaching_core::logging;
use coaching_core::ports::Clock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    logging::init_tracing(&config.server).context("failed to initialize logging")?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ledger = Arc::new(ThrottleLedger::new(
        Arc::new(InMemoryThrottleStore::new()),
        Arc::new(InMemoryThrottleStore::new()),
        clock.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = ThrottleReaper::with_config(
        ledger.clone(),
        ThrottleReaperConfig::default().with_interval(config.throttle.reaper_interval()),
    )
    .spawn(shutdown_rx);

    let state = AppState::new(
        &config,
        ledger,
        Arc::new(InMemoryCommitmentRepository::new()),
        Arc::new(TracingReminderDispatcher::new()),
        clock,
    );
    let app = app_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            ))),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        requests_per_window = config.throttle.requests_per_window,
        window_secs = config.throttle.window_secs,
        "coaching-core listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    let _ = shutdown_tx.send(true);
    reaper.await.context("throttle reaper panicked")?;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
