use clap::Parser;
use metacat::db::Db;
use metacat::lineage::{get_lineage, LineageDirection};
use metacat::{Config, SqliteCatalog};
use anyhow::Result;

#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(about = "Query the provenance lineage of a catalog entity")]
struct Args {
    /// GUID of the entity to start from
    guid: String,

    /// Traversal direction: input (upstream), output (downstream), or both
    #[arg(short, long, default_value = "both")]
    direction: String,

    /// Hop bound; 0 means unbounded. Defaults to lineage.default_depth
    /// from config.toml.
    #[arg(long)]
    depth: Option<i64>,

    /// Emit the raw result as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    let config = Config::load()?;
    let direction: LineageDirection = args.direction.parse()?;
    let depth = args.depth.unwrap_or(config.lineage.default_depth);

    let catalog = SqliteCatalog::new(Db::new(config.db_path()));
    let result = get_lineage(&catalog, &args.guid, direction, depth).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Lineage of {} (direction {}, depth {}):\n",
        args.guid, result.lineage_direction, result.lineage_depth
    );

    println!("{} entities:", result.guid_entity_map.len());
    let mut entities: Vec<_> = result.guid_entity_map.values().collect();
    entities.sort_by_key(|h| h.display_name().to_string());
    for header in entities {
        let tags = if header.classifications.is_empty() {
            String::new()
        } else {
            format!("  [{}]", header.classifications.join(", "))
        };
        println!(
            "  {:<28} {:<12} {}{}",
            header.display_name(),
            header.type_name,
            header.guid,
            tags
        );
    }

    println!("\n{} relations:", result.relations.len());
    let mut relations: Vec<_> = result.relations.iter().collect();
    relations.sort_by(|a, b| (&a.source_guid, &a.label).cmp(&(&b.source_guid, &b.label)));
    for rel in relations {
        let from = result
            .guid_entity_map
            .get(&rel.source_guid)
            .map(|h| h.display_name())
            .unwrap_or(rel.source_guid.as_str());
        let to = result
            .guid_entity_map
            .get(&rel.target_guid)
            .map(|h| h.display_name())
            .unwrap_or(rel.target_guid.as_str());
        println!("  {} --{}--> {}", from, rel.label, to);
    }

    Ok(())
}
