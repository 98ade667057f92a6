pub mod config;
pub mod error;
pub mod db;
pub mod catalog;
pub mod lineage;
pub mod quickstart;

pub use config::Config;
pub use error::{MetacatError, Result};
pub use catalog::{CatalogIntake, CatalogSource, Entity, EntityHeader, InMemoryCatalog, SqliteCatalog};
pub use lineage::{get_lineage, traverse, LineageDirection, LineageRelation, LineageResult};
