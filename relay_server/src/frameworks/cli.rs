use clap::Parser;

use crate::frameworks::config;

/// Pairs two dogfight clients and relays their inputs in lockstep.
#[derive(Debug, Clone, Parser)]
#[command(name = "relay_server", version)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "RELAY_HOST", default_value = config::DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "RELAY_PORT", default_value_t = config::DEFAULT_PORT)]
    pub port: u16,
}
