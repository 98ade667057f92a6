use metacat::db::{Db, migrate};
use metacat::{quickstart, Config};
use std::path::Path;
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("verify");

    match command {
        "quickstart" => {
            run_quickstart().await?;
        }
        "verify" | _ => {
            run_schema_verification().await?;
        }
    }

    Ok(())
}

/// Migrate the configured database and seed the sample sales catalog.
async fn run_quickstart() -> Result<()> {
    let config = Config::load()?;
    let db = Db::new(config.db_path());

    let migrations_dir = Path::new("migrations");
    db.with_connection(|conn| {
        migrate::run_migrations(conn, migrations_dir)
    }).await?;

    let catalog = metacat::SqliteCatalog::new(db);
    let guids = quickstart::seed(&catalog).await?;

    println!("Seeded sample sales catalog into {}", config.db_path().display());
    println!();
    println!("{:<28} GUID", "Name");
    println!("{:-<66}", "");
    let mut rows: Vec<_> = guids.iter().collect();
    rows.sort();
    for (name, guid) in rows {
        println!("{:<28} {}", name, guid);
    }
    println!();
    println!(
        "Try: lineage {} --direction both --depth 0",
        guids.guid(quickstart::SALES_FACT_DAILY_MV)?
    );

    Ok(())
}

/// Check that the catalog schema tables exist in the configured database.
async fn run_schema_verification() -> Result<()> {
    let config = Config::load()?;
    let db = Db::new(config.db_path());

    let tables = db.with_connection(|conn| {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;
        Ok(names)
    }).await?;

    let expected = ["entities", "relations", "classifications", "schema_migrations"];
    let mut ok = true;
    for table in expected {
        if tables.iter().any(|t| t == table) {
            println!("  ok  {}", table);
        } else {
            println!("MISS  {}", table);
            ok = false;
        }
    }

    if !ok {
        anyhow::bail!("schema incomplete; run `metacat quickstart` to migrate and seed");
    }

    println!("Schema verified: {}", config.db_path().display());
    Ok(())
}
