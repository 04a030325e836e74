// Framework bootstrap for the relay runtime.

use crate::frameworks::cli::Args;
use crate::frameworks::config;
use crate::interface_adapters::net::accept_loop;
use crate::use_cases::{RelayEvent, relay_task};

use std::io::Result;
use tokio::sync::mpsc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;

    // All relay state lives in one task; connections talk to it over a channel.
    let (events_tx, events_rx) = mpsc::channel::<RelayEvent>(config::EVENT_CHANNEL_CAPACITY);
    tokio::spawn(relay_task(events_rx));

    tracing::info!(%address, "listening");

    accept_loop(listener, events_tx, config::outbound_capacity())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "relay stopped");
        })
}

pub async fn run_with_config(args: Args) -> Result<()> {
    init_tracing();

    let address = format!("{}:{}", args.host, args.port);

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    tokio::select! {
        served = run(listener) => served,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
