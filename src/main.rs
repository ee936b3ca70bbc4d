use anyhow::Result;
use clap::Parser;

use stocks_cli::app::bootstrap;
use stocks_cli::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    bootstrap::run(cli).await?;
    Ok(())
}
