//! In-memory catalog backed by RwLock'd maps.
//!
//! The write API (`add_entity`, `add_relation`, `add_classification`) is for
//! seeders and tests; lineage queries only take read locks, so concurrent
//! queries against a shared catalog never contend with each other.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::catalog::{CatalogIntake, CatalogSource, Entity, EntityHeader};
use crate::error::{MetacatError, Result};
use crate::lineage::{relations_from_process, LineageDirection, LineageRelation};

/// In-memory `CatalogSource` implementation.
#[derive(Default)]
pub struct InMemoryCatalog {
    entities: RwLock<HashMap<String, Entity>>,
    relations: RwLock<Vec<LineageRelation>>,
    classifications: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, returning its GUID. For `LoadProcess` entities the
    /// provenance edges implied by the `inputs`/`outputs` reference
    /// attributes are indexed as well.
    pub fn add_entity(&self, entity: Entity) -> Result<String> {
        let guid = entity.guid.clone();
        for relation in relations_from_process(&entity) {
            self.add_relation(relation)?;
        }
        self.entities
            .write()
            .map_err(|_| MetacatError::Internal("entity map lock poisoned".to_string()))?
            .insert(guid.clone(), entity);
        Ok(guid)
    }

    /// Index a directed edge. Duplicate (source, target, label) triples are
    /// kept in the index; lineage results deduplicate on read.
    pub fn add_relation(&self, relation: LineageRelation) -> Result<()> {
        self.relations
            .write()
            .map_err(|_| MetacatError::Internal("relation index lock poisoned".to_string()))?
            .push(relation);
        Ok(())
    }

    /// Attach a classification type name to an entity.
    pub fn add_classification(&self, guid: &str, type_name: &str) -> Result<()> {
        self.classifications
            .write()
            .map_err(|_| MetacatError::Internal("classification map lock poisoned".to_string()))?
            .entry(guid.to_string())
            .or_default()
            .push(type_name.to_string());
        Ok(())
    }

    /// Number of registered entities.
    pub fn entity_count(&self) -> Result<usize> {
        Ok(self
            .entities
            .read()
            .map_err(|_| MetacatError::Internal("entity map lock poisoned".to_string()))?
            .len())
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn resolve_entity(&self, guid: &str) -> Result<Option<EntityHeader>> {
        let entities = self
            .entities
            .read()
            .map_err(|_| MetacatError::Internal("entity map lock poisoned".to_string()))?;
        let Some(entity) = entities.get(guid) else {
            return Ok(None);
        };
        let classifications = self
            .classifications
            .read()
            .map_err(|_| MetacatError::Internal("classification map lock poisoned".to_string()))?
            .get(guid)
            .cloned()
            .unwrap_or_default();
        Ok(Some(EntityHeader::from_entity(entity, classifications)))
    }

    async fn incident_edges(
        &self,
        guid: &str,
        direction: LineageDirection,
    ) -> Result<Vec<LineageRelation>> {
        let relations = self
            .relations
            .read()
            .map_err(|_| MetacatError::Internal("relation index lock poisoned".to_string()))?;
        let edges = relations
            .iter()
            .filter(|r| match direction {
                LineageDirection::Output => r.source_guid == guid,
                LineageDirection::Input => r.target_guid == guid,
                LineageDirection::Both => r.source_guid == guid || r.target_guid == guid,
            })
            .cloned()
            .collect();
        Ok(edges)
    }
}

#[async_trait]
impl CatalogIntake for InMemoryCatalog {
    async fn add_entity(&self, entity: Entity) -> Result<String> {
        InMemoryCatalog::add_entity(self, entity)
    }

    async fn add_relation(&self, relation: LineageRelation) -> Result<()> {
        InMemoryCatalog::add_relation(self, relation)
    }

    async fn add_classification(&self, guid: &str, type_name: &str) -> Result<()> {
        InMemoryCatalog::add_classification(self, guid, type_name)
    }
}
