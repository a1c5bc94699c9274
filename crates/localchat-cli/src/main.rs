mod chat;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Settings};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = Settings::load(args)?;
    info!(base_url = %settings.base_url, model = %settings.model, "asking");

    let client = localchat::clients::openai::Client::from_url(
        settings.api_key.expose_secret(),
        &settings.base_url,
    )?;

    let message = chat::ask(&client, &settings)
        .await
        .with_context(|| format!("chat completion against {} failed", settings.base_url))?;

    println!("{}", chat::render(&message, settings.output)?);

    Ok(())
}
