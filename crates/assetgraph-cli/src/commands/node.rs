//! Node listing command

use clap::Args;

use crate::output::{body_preview, to_json, OutputFormat};
use crate::AppContext;
use assetgraph_core::{filter, Filter, GraphView, Node};

#[derive(Args)]
pub struct NodeArgs {
    /// Keep nodes with any of these labels
    #[arg(short, long)]
    pub label: Vec<String>,
    /// Keep nodes with any of these names
    #[arg(short, long)]
    pub name: Vec<String>,
    /// Keep nodes whose body contains this text
    #[arg(long)]
    pub body_contains: Option<String>,
}

/// Nodes matching the arguments, sorted by name for stable output
pub fn select(args: &NodeArgs, graph: &impl GraphView) -> Vec<Node> {
    let mut filters: Vec<Box<dyn Filter<Node>>> = Vec::new();
    if !args.label.is_empty() {
        filters.push(Box::new(filter::node_label_in(args.label.clone())));
    }
    if !args.name.is_empty() {
        filters.push(Box::new(filter::node_name_in(args.name.clone())));
    }
    if let Some(needle) = args.body_contains.clone() {
        filters.push(Box::new(move |node: &Node| {
            String::from_utf8_lossy(&node.body).contains(needle.as_str())
        }));
    }

    let refs: Vec<&dyn Filter<Node>> = filters.iter().map(|f| f.as_ref()).collect();
    let mut nodes = graph.list_nodes(&refs);
    nodes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.label.cmp(&b.label)));
    nodes
}

pub fn run(args: &NodeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let nodes = select(args, &ctx.loaded.graph);
    tracing::info!("Found {} nodes", nodes.len());

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&nodes)?),
        OutputFormat::Table => {
            if nodes.is_empty() {
                println!("No nodes found");
                return Ok(());
            }
            println!("Nodes ({} found):", nodes.len());
            for node in &nodes {
                println!("  {} ({}) {}", node.name, node.label, body_preview(&node.body));
            }
        }
    }
    Ok(())
}
