//! Taskboard server binary.
//!
//! ```text
//! taskboard [--database-url URL] [--pool-size N] [--log FILTER] serve [--bind ADDR]
//! taskboard [--database-url URL] tools [--list-tools]
//! ```
//!
//! Without a database URL the process keeps all records in memory and loses
//! them on exit.

use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use mockable::{Clock, DefaultClock};
use std::{io::Write, net::SocketAddr, sync::Arc};
use taskboard::{
    config::{Cli, Command},
    telemetry,
    tracker::{
        adapters::{memory::InMemoryTrackerStore, postgres::PostgresTrackerStore},
        ports::{TrackerStore, TrackerStoreError},
        services::TrackerService,
    },
    transport::{
        rest,
        tools::{ToolRegistry, catalogue, serve_lines},
    },
};
use thiserror::Error;
use tokio::io::BufReader;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop the process.
#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to install log subscriber: {0}")]
    Telemetry(#[source] tracing_subscriber::util::TryInitError),
    #[error("failed to build database pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("failed to prepare database schema: {0}")]
    Schema(#[source] TrackerStoreError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode tool catalogue: {0}")]
    Catalogue(#[source] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log).map_err(StartupError::Telemetry)?;

    if let Command::Tools { list_tools: true } = cli.command {
        list_tool_catalogue()?;
        return Ok(());
    }

    let clock = Arc::new(DefaultClock);
    if let Some(url) = cli.database_url.as_deref() {
        let pool = Pool::builder()
            .max_size(cli.pool_size)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(StartupError::Pool)?;
        let store = PostgresTrackerStore::new(pool);
        store.ensure_schema().await.map_err(StartupError::Schema)?;
        info!(pool_size = cli.pool_size, "using PostgreSQL store");
        run(cli.command, TrackerService::new(Arc::new(store), clock)).await?;
    } else {
        info!("using in-memory store");
        let store = Arc::new(InMemoryTrackerStore::new());
        run(cli.command, TrackerService::new(store, clock)).await?;
    }
    Ok(())
}

fn list_tool_catalogue() -> Result<(), StartupError> {
    let encoded =
        serde_json::to_string_pretty(&catalogue()).map_err(StartupError::Catalogue)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{encoded}")?;
    Ok(())
}

async fn run<S, C>(command: Command, service: TrackerService<S, C>) -> Result<(), StartupError>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    match command {
        Command::Serve { bind } => serve(bind, service).await,
        Command::Tools { .. } => {
            let registry = ToolRegistry::new(service);
            let input = BufReader::new(tokio::io::stdin());
            serve_lines(&registry, input, tokio::io::stdout()).await?;
            Ok(())
        }
    }
}

async fn serve<S, C>(addr: SocketAddr, service: TrackerService<S, C>) -> Result<(), StartupError>
where
    S: TrackerStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, "serving REST API");
    axum::serve(listener, rest::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("REST API stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. If the listener fails the server keeps
/// running instead of shutting down at once.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::wait_for_shutdown;

    async fn settles(signal: impl Future<Output = std::io::Result<()>>) -> bool {
        tokio::select! {
            biased;
            () = wait_for_shutdown(signal) => true,
            () = tokio::task::yield_now() => false,
        }
    }

    #[tokio::test]
    async fn delivered_signal_stops_the_server() {
        assert!(settles(async { Ok(()) }).await);
    }

    #[tokio::test]
    async fn failed_signal_listener_keeps_the_server_running() {
        let failing = async { Err(std::io::Error::other("no signal handler")) };
        assert!(!settles(failing).await);
    }
}
