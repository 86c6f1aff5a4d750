//! Assetgraph CLI - Command line interface for querying graph descriptions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod loader;
mod output;

use commands::{completions, connection, node, relationship};
use config::Config;
use loader::LoadedGraph;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "assetgraph")]
#[command(author, version, about = "Query labeled nodes and the paths between them")]
pub struct Cli {
    /// Graph description file (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true)]
    pub graph: Option<PathBuf>,

    /// Config file
    #[arg(long, env = "ASSETGRAPH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(config::default_config_path)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List nodes
    Nodes(node::NodeArgs),
    /// List relationships
    Relationships(relationship::RelationshipArgs),
    /// Find every path between two nodes
    Connections(connection::ConnectionArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

/// Application context with the loaded graph
pub struct AppContext {
    pub loaded: LoadedGraph,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let path = cli
            .graph
            .clone()
            .or_else(|| config.default_graph.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("no graph file given; pass --graph or set default_graph in the config")
            })?;
        tracing::debug!("Using graph file: {:?}", path);

        let format: OutputFormat = cli
            .format
            .as_deref()
            .unwrap_or(config.default_format.as_str())
            .into();

        Ok(Self {
            loaded: loader::load(&path)?,
            format,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting assetgraph CLI");

    let config_path = cli.config_path();

    match &cli.command {
        Commands::Completions(args) => completions::run(args)?,
        Commands::Config(args) => commands::config::run(args, &config_path)?,
        Commands::Nodes(args) => {
            let ctx = AppContext::new(&cli, &Config::load(&config_path)?)?;
            node::run(args, &ctx)?
        }
        Commands::Relationships(args) => {
            let ctx = AppContext::new(&cli, &Config::load(&config_path)?)?;
            relationship::run(args, &ctx)?
        }
        Commands::Connections(args) => {
            let ctx = AppContext::new(&cli, &Config::load(&config_path)?)?;
            connection::run(args, &ctx)?
        }
    }

    Ok(())
}
