//! SQLite-backed catalog over the shared `db::Db` connection manager.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::catalog::{CatalogIntake, CatalogSource, Entity, EntityHeader};
use crate::db::Db;
use crate::error::{MetacatError, Result};
use crate::lineage::{relations_from_process, LineageDirection, LineageRelation};

/// Catalog stored in the `entities` / `relations` / `classifications` tables.
pub struct SqliteCatalog {
    db: Db,
}

impl SqliteCatalog {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Number of stored entities.
    pub async fn entity_count(&self) -> Result<i64> {
        self.db
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM entities", [], |row| row.get(0))
                    .map_err(MetacatError::Database)
            })
            .await
    }
}

#[async_trait]
impl CatalogIntake for SqliteCatalog {
    /// Insert an entity, returning its GUID. `LoadProcess` entities also get
    /// their `inputs`/`outputs` reference attributes indexed as edges.
    async fn add_entity(&self, entity: Entity) -> Result<String> {
        let guid = entity.guid.clone();
        let derived = relations_from_process(&entity);
        let attributes_json = serde_json::to_string(&entity.attributes)
            .map_err(|e| MetacatError::Internal(format!("attribute serialization failed: {}", e)))?;

        self.db
            .with_connection(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO entities (guid, type_name, attributes_json) VALUES (?1, ?2, ?3)",
                    params![entity.guid, entity.type_name, attributes_json],
                )?;
                for rel in &derived {
                    tx.execute(
                        "INSERT OR IGNORE INTO relations (source_guid, target_guid, label) \
                         VALUES (?1, ?2, ?3)",
                        params![rel.source_guid, rel.target_guid, rel.label],
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await?;

        Ok(guid)
    }

    /// Index a directed edge. The triple primary key absorbs duplicates.
    async fn add_relation(&self, relation: LineageRelation) -> Result<()> {
        self.db
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO relations (source_guid, target_guid, label) \
                     VALUES (?1, ?2, ?3)",
                    params![relation.source_guid, relation.target_guid, relation.label],
                )?;
                Ok(())
            })
            .await
    }

    /// Attach a classification type name to an entity.
    async fn add_classification(&self, guid: &str, type_name: &str) -> Result<()> {
        let guid = guid.to_string();
        let type_name = type_name.to_string();
        self.db
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO classifications (entity_guid, type_name) \
                     VALUES (?1, ?2)",
                    params![guid, type_name],
                )?;
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl CatalogSource for SqliteCatalog {
    async fn resolve_entity(&self, guid: &str) -> Result<Option<EntityHeader>> {
        let guid = guid.to_string();
        self.db
            .with_connection(move |conn| {
                let row: Option<(String, String)> = conn
                    .query_row(
                        "SELECT type_name, attributes_json FROM entities WHERE guid = ?1",
                        params![guid],
                        |row| Ok((row.get(0)?, row.get(1)?)),
                    )
                    .optional()?;

                let Some((type_name, attributes_json)) = row else {
                    return Ok(None);
                };

                let attributes: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_str(&attributes_json).map_err(|e| {
                        MetacatError::Internal(format!(
                            "corrupt attributes_json for {}: {}", guid, e
                        ))
                    })?;

                let mut stmt = conn.prepare(
                    "SELECT type_name FROM classifications WHERE entity_guid = ?1 ORDER BY type_name",
                )?;
                let classifications = stmt
                    .query_map(params![guid], |row| row.get::<_, String>(0))?
                    .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

                let entity = Entity { guid, type_name, attributes };
                Ok(Some(EntityHeader::from_entity(&entity, classifications)))
            })
            .await
    }

    async fn incident_edges(
        &self,
        guid: &str,
        direction: LineageDirection,
    ) -> Result<Vec<LineageRelation>> {
        let guid = guid.to_string();
        self.db
            .with_connection(move |conn| {
                let sql = match direction {
                    LineageDirection::Output => {
                        "SELECT source_guid, target_guid, label FROM relations \
                         WHERE source_guid = ?1"
                    }
                    LineageDirection::Input => {
                        "SELECT source_guid, target_guid, label FROM relations \
                         WHERE target_guid = ?1"
                    }
                    LineageDirection::Both => {
                        "SELECT source_guid, target_guid, label FROM relations \
                         WHERE source_guid = ?1 OR target_guid = ?1"
                    }
                };
                let mut stmt = conn.prepare(sql)?;
                let rows = stmt.query_map(params![guid], |row| {
                    Ok(LineageRelation {
                        source_guid: row.get(0)?,
                        target_guid: row.get(1)?,
                        label: row.get(2)?,
                    })
                })?;
                let mut edges = Vec::new();
                for row in rows {
                    edges.push(row.map_err(MetacatError::Database)?);
                }
                Ok(edges)
            })
            .await
    }
}
