mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mockfs")]
#[command(version, about = "mockfs CLI - file-system routed mock handlers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes derived from the handler directories
    Routes {
        /// Config file (default: ./mockfs.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base URL routes are joined onto (overrides the config file)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Print the route table as JSON
        #[arg(long)]
        json: bool,

        /// Directories to scan (overrides the config file)
        dirs: Vec<PathBuf>,
    },

    /// Print the effective options
    Config {
        /// Config file (default: ./mockfs.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Routes {
            config,
            base_url,
            json,
            dirs,
        } => {
            let options = commands::load_options(config.as_deref())?;
            let options = commands::routes::apply_overrides(options, base_url, dirs);
            commands::routes::execute(&options, json).await?;
        }
        Commands::Config { config } => {
            let options = commands::load_options(config.as_deref())?;
            commands::config::execute(&options)?;
        }
    }

    Ok(())
}
