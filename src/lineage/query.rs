//! The lineage query operation: validate, traverse, assemble.

use std::collections::HashMap;

use crate::catalog::CatalogSource;
use crate::error::{MetacatError, Result};
use crate::lineage::{traverse, LineageDirection, LineageResult};

/// Compute the provenance subgraph around `guid`.
///
/// `depth` bounds traversal hops; negative is invalid and `0` means
/// unbounded (exhaust the connected component). All-or-nothing: on error no
/// partial result is returned. Concurrent calls against a shared catalog are
/// independent; this function performs reads only.
pub async fn get_lineage(
    source: &dyn CatalogSource,
    guid: &str,
    direction: LineageDirection,
    depth: i64,
) -> Result<LineageResult> {
    if depth < 0 {
        return Err(MetacatError::InvalidInput(format!(
            "lineage depth must be >= 0 (0 means unbounded), got {}",
            depth
        )));
    }

    let (visited, relations) = traverse(source, guid, direction, depth as u64).await?;

    // Every visited GUID resolved during traversal; a miss here means the
    // catalog changed underneath us or the source is inconsistent.
    let mut guid_entity_map = HashMap::with_capacity(visited.len());
    for node in visited {
        match source.resolve_entity(&node).await? {
            Some(header) => {
                guid_entity_map.insert(node, header);
            }
            None => {
                return Err(MetacatError::Internal(format!(
                    "visited entity {} no longer resolves in the catalog",
                    node
                )));
            }
        }
    }

    log::debug!(
        "lineage of {} ({}, depth {}): {} entities, {} relations",
        guid,
        direction,
        depth,
        guid_entity_map.len(),
        relations.len()
    );

    Ok(LineageResult {
        base_entity_guid: guid.to_string(),
        lineage_direction: direction,
        lineage_depth: depth,
        guid_entity_map,
        relations,
    })
}
