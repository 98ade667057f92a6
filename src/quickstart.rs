//! Sample sales-catalog seeder.
//!
//! Populates a catalog with the classic demo model: a sales database, fact
//! and dimension tables with columns, a view, and two load processes whose
//! inputs/outputs wire up the provenance graph:
//!
//! ```text
//! sales_fact ──┐
//!              ├─> loadSalesDaily ─> sales_fact_daily_mv ─> loadSalesMonthly ─> sales_fact_monthly_mv
//! time_dim ────┘
//! ```

use std::collections::HashMap;

use serde_json::json;

use crate::catalog::{
    guid_ref, CatalogIntake, Entity, COLUMN_TYPE, DATABASE_TYPE, LOAD_PROCESS_TYPE, TABLE_TYPE,
    VIEW_TYPE,
};
use crate::error::{MetacatError, Result};

pub const SALES_DB: &str = "Sales";
pub const SALES_FACT_TABLE: &str = "sales_fact";
pub const PRODUCT_DIM_TABLE: &str = "product_dim";
pub const TIME_DIM_TABLE: &str = "time_dim";
pub const CUSTOMER_DIM_TABLE: &str = "customer_dim";
pub const SALES_FACT_DAILY_MV: &str = "sales_fact_daily_mv";
pub const SALES_FACT_MONTHLY_MV: &str = "sales_fact_monthly_mv";
pub const PRODUCT_DIM_VIEW: &str = "product_dim_view";
pub const LOAD_SALES_DAILY_PROCESS: &str = "loadSalesDaily";
pub const LOAD_SALES_MONTHLY_PROCESS: &str = "loadSalesMonthly";

pub const DIMENSION_CLASSIFICATION: &str = "Dimension";
pub const FACT_CLASSIFICATION: &str = "Fact";
pub const METRIC_CLASSIFICATION: &str = "Metric";
pub const ETL_CLASSIFICATION: &str = "ETL";

/// Name -> GUID map produced by seeding, for looking fixture entities back up.
#[derive(Debug, Default)]
pub struct QuickstartGuids(HashMap<String, String>);

impl QuickstartGuids {
    fn insert(&mut self, name: &str, guid: String) {
        self.0.insert(name.to_string(), guid);
    }

    /// GUID of a seeded entity, erroring on unknown names.
    pub fn guid(&self, name: &str) -> Result<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| MetacatError::EntityNotFound(format!("quickstart entity {}", name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

async fn add_table(
    catalog: &dyn CatalogIntake,
    guids: &mut QuickstartGuids,
    db_guid: &str,
    name: &str,
    description: &str,
    columns: &[String],
) -> Result<String> {
    let table = Entity::new(TABLE_TYPE, name, description)
        .with_attribute("db", guid_ref(db_guid))
        .with_refs("columns", columns)
        .with_attribute("created_at", json!(chrono::Utc::now().to_rfc3339()));
    let guid = catalog.add_entity(table).await?;
    guids.insert(name, guid.clone());
    Ok(guid)
}

async fn add_column(
    catalog: &dyn CatalogIntake,
    name: &str,
    data_type: &str,
    description: &str,
) -> Result<String> {
    let column = Entity::new(COLUMN_TYPE, name, description)
        .with_attribute("dataType", json!(data_type));
    catalog.add_entity(column).await
}

async fn add_process<S: AsRef<str>>(
    catalog: &dyn CatalogIntake,
    guids: &mut QuickstartGuids,
    name: &str,
    description: &str,
    inputs: &[S],
    outputs: &[S],
) -> Result<String> {
    let process = Entity::new(LOAD_PROCESS_TYPE, name, description)
        .with_refs("inputs", inputs)
        .with_refs("outputs", outputs)
        .with_attribute("queryText", json!(format!("insert overwrite {}", name)));
    let guid = catalog.add_entity(process).await?;
    guids.insert(name, guid.clone());
    Ok(guid)
}

/// Seed the sample sales catalog. Returns the name -> GUID map.
pub async fn seed(catalog: &dyn CatalogIntake) -> Result<QuickstartGuids> {
    let mut guids = QuickstartGuids::default();

    let db = Entity::new(DATABASE_TYPE, SALES_DB, "sales database")
        .with_attribute("owner", json!("John ETL"));
    let db_guid = catalog.add_entity(db).await?;
    guids.insert(SALES_DB, db_guid.clone());

    // sales_fact columns
    let time_id = add_column(catalog, "time_id", "int", "time id").await?;
    let product_id = add_column(catalog, "product_id", "int", "product id").await?;
    let customer_id = add_column(catalog, "customer_id", "int", "customer id").await?;
    let sales = add_column(catalog, "sales", "double", "product id").await?;
    catalog
        .add_classification(&sales, METRIC_CLASSIFICATION)
        .await?;

    let sales_fact = add_table(
        catalog,
        &mut guids,
        &db_guid,
        SALES_FACT_TABLE,
        "sales fact table",
        &[time_id, product_id, customer_id, sales],
    )
    .await?;
    catalog
        .add_classification(&sales_fact, FACT_CLASSIFICATION)
        .await?;

    let product_dim = add_table(
        catalog,
        &mut guids,
        &db_guid,
        PRODUCT_DIM_TABLE,
        "product dimension table",
        &[],
    )
    .await?;
    let time_dim = add_table(
        catalog,
        &mut guids,
        &db_guid,
        TIME_DIM_TABLE,
        "time dimension table",
        &[],
    )
    .await?;
    let customer_dim = add_table(
        catalog,
        &mut guids,
        &db_guid,
        CUSTOMER_DIM_TABLE,
        "customer dimension table",
        &[],
    )
    .await?;
    for dim in [&product_dim, &time_dim, &customer_dim] {
        catalog
            .add_classification(dim, DIMENSION_CLASSIFICATION)
            .await?;
    }

    let daily_mv = add_table(
        catalog,
        &mut guids,
        &db_guid,
        SALES_FACT_DAILY_MV,
        "sales fact daily materialized view",
        &[],
    )
    .await?;
    let monthly_mv = add_table(
        catalog,
        &mut guids,
        &db_guid,
        SALES_FACT_MONTHLY_MV,
        "sales fact monthly materialized view",
        &[],
    )
    .await?;

    let view = Entity::new(VIEW_TYPE, PRODUCT_DIM_VIEW, "product dim view")
        .with_attribute("db", guid_ref(&db_guid))
        .with_refs("inputTables", &[&product_dim]);
    let view_guid = catalog.add_entity(view).await?;
    catalog
        .add_classification(&view_guid, DIMENSION_CLASSIFICATION)
        .await?;
    guids.insert(PRODUCT_DIM_VIEW, view_guid);

    let daily = add_process(
        catalog,
        &mut guids,
        LOAD_SALES_DAILY_PROCESS,
        "hive query for daily summary",
        &[&sales_fact, &time_dim],
        &[&daily_mv],
    )
    .await?;
    let monthly = add_process(
        catalog,
        &mut guids,
        LOAD_SALES_MONTHLY_PROCESS,
        "hive query for monthly summary",
        &[&daily_mv],
        &[&monthly_mv],
    )
    .await?;
    for process in [&daily, &monthly] {
        catalog
            .add_classification(process, ETL_CLASSIFICATION)
            .await?;
    }

    log::info!("quickstart catalog seeded ({} named entities)", guids.0.len());

    Ok(guids)
}
