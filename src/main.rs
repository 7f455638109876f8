//! Backend-forwarding gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌───────────────────────────────────────────────┐
//!                      │                   GATEWAY                      │
//!   Caller Request     │  ┌────────┐   ┌───────────┐   ┌────────────┐  │
//!  ────────────────────┼─▶│  http  │──▶│  gateway  │──▶│  security  │  │
//!   (or invoke event)  │  │ server │   │  handler  │   │ guard/hdrs │  │
//!                      │  └────────┘   └─────┬─────┘   └─────┬──────┘  │
//!                      │                     │               │         │
//!                      │               ┌─────▼─────┐   ┌─────▼──────┐  │
//!   Caller Response    │               │  config   │   │  upstream  │──┼──▶ Backend
//!  ◀───────────────────┼───────────────│  sources  │   │ forwarder  │◀─┼───
//!   (always + CORS)    │               └───────────┘   └────────────┘  │
//!                      └───────────────────────────────────────────────┘
//! ```
//!
//! `serve` runs the HTTP host. `invoke` reads a single host event (JSON) on
//! stdin and writes the response JSON to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

use backend_gateway::config::{load_or_default, EnvSource, GatewayConfig};
use backend_gateway::observability::{logging, metrics};
use backend_gateway::{GatewayHandler, HttpServer, IncomingRequest, ReqwestForwarder, Shutdown};

#[derive(Parser)]
#[command(name = "backend-gateway")]
#[command(about = "Credential-injecting gateway in front of a private backend API", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Handle one host event read from stdin and print the response
    Invoke,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_or_default(cli.config.as_deref())?;

    logging::init(&config.observability);

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.listener.bind_address = bind;
            }
            serve(config).await
        }
        Commands::Invoke => invoke(config).await,
    }
}

async fn serve(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("backend-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        function_prefix = %config.gateway.function_prefix,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn invoke(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    let event: IncomingRequest = serde_json::from_str(&input)?;

    let forwarder = ReqwestForwarder::new(&config.timeouts)?;
    let handler = GatewayHandler::new(&config, Arc::new(EnvSource), forwarder);
    let response = handler.handle(&event).await;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
