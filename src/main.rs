//! MCP server entrypoint (streamable HTTP transport).
//!
//! Serves the memory tools over HTTP with server-sent event streams for remotely hosted
//! integrations. Exits with code 1 when the credential is missing or the listener cannot bind.
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tokio::{net::TcpListener, sync::watch};
use zepmem::{api, config, logging, mcp::ZepMemMcpServer, memory::MemoryService};

#[derive(Parser)]
#[command(name = "zepmem", about = "Zep memory MCP server over streamable HTTP", version)]
struct Cli {
    /// Port to listen on; overrides SERVER_PORT.
    #[arg(long)]
    port: Option<u16>,
    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();
    let config = config::init_config().context("refusing to start")?;

    let memory = MemoryService::new(config).context("failed to build memory service client")?;
    let server = ZepMemMcpServer::new(Arc::new(memory));
    let app = api::create_router(server, config.http_stateful);

    let (listener, port) = bind_listener(cli.host, cli.port.or(config.server_port))
        .await
        .context("failed to bind HTTP listener")?;
    tracing::info!(
        "Listening on http://{}:{}{}",
        cli.host,
        port,
        api::MCP_PATH
    );

    serve_until_shutdown(listener, app, shutdown_signal(), SHUTDOWN_GRACE).await?;

    tracing::info!("Server shut down");
    Ok(())
}

/// How long open connections may drain after Ctrl-C before the process exits anyway.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Serve `app` until `signal` fires, then give open connections `grace` to drain.
///
/// Stateful sessions keep GET event streams open indefinitely; without the bound they would
/// block shutdown.
async fn serve_until_shutdown(
    listener: TcpListener,
    app: Router,
    signal: impl Future<Output = ()> + Send + 'static,
    grace: Duration,
) -> Result<()> {
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let serve = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = stop_tx.send(true);
        })
        .into_future();

    let grace_expired = async move {
        if stop_rx.changed().await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = serve => result.context("HTTP server terminated unexpectedly")?,
        _ = grace_expired => {
            tracing::warn!(
                grace_ms = grace.as_millis() as u64,
                "Open connections outlived the shutdown grace period; exiting"
            );
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}

async fn bind_listener(host: IpAddr, port: Option<u16>) -> Result<(TcpListener, u16), std::io::Error> {
    if let Some(port) = port {
        return TcpListener::bind((host, port))
            .await
            .map(|listener| (listener, port));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 4100..=4199;
    for port in PORT_RANGE {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                return Ok((listener, port));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 4100-4199",
    ))
}
