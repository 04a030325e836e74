use std::process::ExitCode;

use clap::Parser;
use dogfight::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // The terminal is restored by the time run returns, so plain output is safe.
    match dogfight::run(args).await {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("dogfight: {error}");
            ExitCode::FAILURE
        }
    }
}
