//! Catalog capabilities: the read side the lineage engine traverses
//! against, and the write side seeders populate.

use async_trait::async_trait;

use crate::catalog::{Entity, EntityHeader};
use crate::error::Result;
use crate::lineage::{LineageDirection, LineageRelation};

/// Read-only view of a catalog: entity resolution plus the relation index.
///
/// Both operations are idempotent, side-effect-free reads and must be safe
/// to call concurrently; the lineage engine issues no writes through this
/// trait. Implementations back onto an in-memory map or a SQLite database.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Resolve a GUID to its display header, or `None` if unknown.
    async fn resolve_entity(&self, guid: &str) -> Result<Option<EntityHeader>>;

    /// Edges incident to `guid`, filtered by direction: `Output` returns
    /// edges where `guid` is the source, `Input` edges where it is the
    /// target, `Both` the union.
    async fn incident_edges(
        &self,
        guid: &str,
        direction: LineageDirection,
    ) -> Result<Vec<LineageRelation>>;
}

/// Write side of a catalog, used by seeders and ingestion paths. The lineage
/// core never touches this trait.
#[async_trait]
pub trait CatalogIntake: Send + Sync {
    /// Register an entity, returning its GUID. Implementations index the
    /// provenance edges implied by process `inputs`/`outputs` attributes.
    async fn add_entity(&self, entity: Entity) -> Result<String>;

    /// Index a directed edge.
    async fn add_relation(&self, relation: LineageRelation) -> Result<()>;

    /// Attach a classification type name to an entity.
    async fn add_classification(&self, guid: &str, type_name: &str) -> Result<()>;
}
