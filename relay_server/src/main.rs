use clap::Parser;
use relay_server::Args;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env locally before clap reads RELAY_* fallbacks; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    relay_server::run_with_config(args).await
}
