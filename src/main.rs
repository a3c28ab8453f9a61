use anyhow::Context;
use env_logger::Env;
use jobbrief::agent::Agent;
use jobbrief::config::{self, AppConfig};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse the specified (or default) .env file before the logger reads RUST_LOG
    let dotenv_path = env::var("JOBBRIEF_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = config::load_dotenv(&dotenv_path);

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    let config = AppConfig::from_env().context("Reading configuration")?;
    let dry_run = config.dry_run.unwrap_or(false);
    let agent = Agent::new(config)?;
    let chunks = agent.run().await?;

    if dry_run {
        println!("{}", chunks.join("\n\n---\n\n"));
    }
    Ok(())
}
