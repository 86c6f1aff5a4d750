//! Connection finding command

use clap::Args;
use serde::Serialize;

use crate::loader::LoadedGraph;
use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use assetgraph_core::{Chain, ConnectionFinder, Relationship};

#[derive(Args)]
pub struct ConnectionArgs {
    /// Source node name
    pub from: String,
    /// Destination node name
    pub to: String,
    /// Maximum number of relationships per path
    #[arg(long)]
    pub max_hops: Option<usize>,
    /// Only follow relationships with any of these labels
    #[arg(long)]
    pub via: Vec<String>,
}

#[derive(Serialize)]
struct ConnectionReport<'a> {
    from: &'a str,
    to: &'a str,
    paths: Vec<PathReport<'a>>,
}

#[derive(Serialize)]
struct PathReport<'a> {
    rendered: String,
    hops: usize,
    chain: &'a Chain,
}

/// Every path between the two named nodes, sorted by length then text
pub fn find(args: &ConnectionArgs, loaded: &LoadedGraph) -> anyhow::Result<Vec<Chain>> {
    let from = loaded.node(&args.from)?;
    let to = loaded.node(&args.to)?;

    let mut finder = ConnectionFinder::new(&loaded.graph);
    if let Some(max) = args.max_hops {
        finder = finder.max_hops(max);
    }
    if !args.via.is_empty() {
        let labels = args.via.clone();
        finder = finder.through(move |rel: &Relationship| labels.contains(&rel.label));
    }

    let mut chains = finder.find(from, to);
    chains.sort_by_cached_key(|chain| (chain.len(), chain.to_string()));
    Ok(chains)
}

pub fn run(args: &ConnectionArgs, ctx: &AppContext) -> anyhow::Result<()> {
    tracing::info!(
        "Finding connections from {} to {} (max_hops: {:?})",
        args.from,
        args.to,
        args.max_hops
    );
    let chains = find(args, &ctx.loaded)?;

    match ctx.format {
        OutputFormat::Json => {
            let report = ConnectionReport {
                from: &args.from,
                to: &args.to,
                paths: chains
                    .iter()
                    .map(|chain| PathReport {
                        rendered: chain.to_string(),
                        hops: chain.len(),
                        chain,
                    })
                    .collect(),
            };
            println!("{}", to_json(&report)?);
        }
        OutputFormat::Table => {
            if chains.is_empty() {
                println!("No connections from '{}' to '{}'", args.from, args.to);
                return Ok(());
            }
            println!(
                "Connections from '{}' to '{}' ({} found):",
                args.from,
                args.to,
                chains.len()
            );
            for chain in &chains {
                println!("  {}", chain);
            }
        }
    }
    Ok(())
}
