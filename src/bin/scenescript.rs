//! Scenescript terminal client

use std::path::PathBuf;

use clap::Parser;

use scenescript::client::api::EngineClient;
use scenescript::client::shell::Shell;

#[derive(Debug, Parser)]
#[command(name = "scenescript", about = "Interactive client for the Scenescript engine")]
struct Args {
    /// Base URL of the engine
    #[arg(long, default_value = "http://127.0.0.1:3001")]
    engine_url: String,

    /// Transcript file to load on startup
    #[arg(long)]
    transcript: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenescript=warn".into()),
        )
        .init();

    let mut shell = Shell::new(EngineClient::new(&args.engine_url));
    if let Some(path) = &args.transcript {
        shell.load_transcript(path)?;
    }

    shell.run().await
}
