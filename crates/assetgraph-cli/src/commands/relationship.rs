//! Relationship listing command

use clap::Args;

use crate::loader::LoadedGraph;
use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use assetgraph_core::{filter, Filter, GraphView, Relationship};

#[derive(Args)]
pub struct RelationshipArgs {
    /// Filter by relationship label
    #[arg(short, long)]
    pub label: Option<String>,
    /// Filter by source node name
    #[arg(long)]
    pub from: Option<String>,
    /// Filter by target node name
    #[arg(long)]
    pub to: Option<String>,
}

pub fn select(args: &RelationshipArgs, loaded: &LoadedGraph) -> anyhow::Result<Vec<Relationship>> {
    let mut filters: Vec<Box<dyn Filter<Relationship>>> = Vec::new();
    if let Some(label) = &args.label {
        filters.push(Box::new(filter::relationship_label(label.clone())));
    }
    if let Some(from) = &args.from {
        let node = loaded.node(from)?;
        filters.push(Box::new(filter::relationship_from(node.id.clone())));
    }
    if let Some(to) = &args.to {
        let node = loaded.node(to)?;
        filters.push(Box::new(filter::relationship_to(node.id.clone())));
    }

    let refs: Vec<&dyn Filter<Relationship>> = filters.iter().map(|f| f.as_ref()).collect();
    let mut relationships = loaded.graph.list_relationships(&refs);
    relationships.sort_by(|a, b| {
        (&a.from_name, &a.label, &a.to_name).cmp(&(&b.from_name, &b.label, &b.to_name))
    });
    Ok(relationships)
}

pub fn run(args: &RelationshipArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let relationships = select(args, &ctx.loaded)?;
    tracing::info!("Found {} relationships", relationships.len());

    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&relationships)?),
        OutputFormat::Table => {
            if relationships.is_empty() {
                println!("No relationships found");
                return Ok(());
            }
            println!("Relationships ({} found):", relationships.len());
            for rel in &relationships {
                println!("  {}", rel);
            }
        }
    }
    Ok(())
}
