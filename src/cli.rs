use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stocks")]
#[command(about = "Browse the most active companies and their latest quotes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API settings file (see assets/configs/iex.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API token
    #[arg(long, global = true, env = "IEX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Browse companies from the prompt (default)
    Interactive,

    /// List the most active companies
    Companies,

    /// Show the quote and logo for one symbol
    Quote {
        /// Ticker symbol (e.g. AAPL)
        symbol: String,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}
