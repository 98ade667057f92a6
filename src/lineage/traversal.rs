//! Level-synchronous BFS over the catalog's relation index.

use std::collections::HashSet;

use crate::catalog::CatalogSource;
use crate::error::{MetacatError, Result};
use crate::lineage::{LineageDirection, LineageRelation};

/// Walk the provenance graph from `start_guid`, following edges oriented by
/// `direction`, up to `max_depth` hops. `max_depth == 0` means unbounded:
/// traverse until the connected component is exhausted, NOT "zero hops".
///
/// Returns the visited GUID set (start node always included) and the
/// deduplicated edge set. Edges whose far endpoint does not resolve in the
/// catalog are dropped silently; the visited set is the sole cycle guard.
///
/// The walk is read-only. Callers wanting a hard cost bound against an
/// unboundedly fanned-out index should pass a non-zero depth or wrap the
/// future in a timeout; each level boundary is an await point.
pub async fn traverse(
    source: &dyn CatalogSource,
    start_guid: &str,
    direction: LineageDirection,
    max_depth: u64,
) -> Result<(HashSet<String>, HashSet<LineageRelation>)> {
    // Existence check comes before any traversal work
    if source.resolve_entity(start_guid).await?.is_none() {
        return Err(MetacatError::EntityNotFound(start_guid.to_string()));
    }

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start_guid.to_string());
    let mut edges: HashSet<LineageRelation> = HashSet::new();

    let mut frontier = vec![start_guid.to_string()];
    let mut level: u64 = 0;

    while !frontier.is_empty() && (max_depth == 0 || level < max_depth) {
        let mut next_frontier = Vec::new();

        for node in &frontier {
            for edge in source.incident_edges(node, direction).await? {
                let Some(far) = edge.far_endpoint(node) else {
                    // Index returned an edge not incident to the queried node
                    log::warn!("relation index returned stray edge for {}: {:?}", node, edge);
                    continue;
                };
                let far = far.to_string();

                if visited.contains(&far) {
                    edges.insert(edge);
                } else if source.resolve_entity(&far).await?.is_some() {
                    visited.insert(far.clone());
                    next_frontier.push(far);
                    edges.insert(edge);
                }
                // else: dangling edge, dropped silently
            }
        }

        level += 1;
        log::debug!(
            "lineage level {}: {} new nodes, {} edges total",
            level,
            next_frontier.len(),
            edges.len()
        );
        frontier = next_frontier;
    }

    Ok((visited, edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Entity, InMemoryCatalog, TABLE_TYPE};
    use crate::lineage::{INPUT_LABEL, OUTPUT_LABEL};

    fn table(catalog: &InMemoryCatalog, name: &str) -> String {
        catalog.add_entity(Entity::new(TABLE_TYPE, name, "")).unwrap()
    }

    /// Chain fixture: a -> b -> c, plus a -> d.
    fn chain_catalog() -> (InMemoryCatalog, [String; 4]) {
        let catalog = InMemoryCatalog::new();
        let a = table(&catalog, "a");
        let b = table(&catalog, "b");
        let c = table(&catalog, "c");
        let d = table(&catalog, "d");
        catalog.add_relation(LineageRelation::new(&a, &b, OUTPUT_LABEL)).unwrap();
        catalog.add_relation(LineageRelation::new(&b, &c, OUTPUT_LABEL)).unwrap();
        catalog.add_relation(LineageRelation::new(&a, &d, OUTPUT_LABEL)).unwrap();
        (catalog, [a, b, c, d])
    }

    #[tokio::test]
    async fn test_unknown_start_fails_before_walking() {
        let catalog = InMemoryCatalog::new();
        let err = traverse(&catalog, "missing", LineageDirection::Both, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, MetacatError::EntityNotFound(_)));
    }

    #[tokio::test]
    async fn test_isolated_start_yields_only_itself() {
        let catalog = InMemoryCatalog::new();
        let lone = table(&catalog, "lone");
        let (nodes, edges) = traverse(&catalog, &lone, LineageDirection::Both, 0)
            .await
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes.contains(&lone));
        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn test_depth_zero_means_unbounded() {
        let (catalog, [a, _b, c, _d]) = chain_catalog();
        let (nodes, edges) = traverse(&catalog, &a, LineageDirection::Output, 0)
            .await
            .unwrap();
        // Whole component, including c which is two hops out
        assert_eq!(nodes.len(), 4);
        assert!(nodes.contains(&c));
        assert_eq!(edges.len(), 3);
    }

    #[tokio::test]
    async fn test_depth_one_stops_expansion_but_keeps_results() {
        let (catalog, [a, b, c, d]) = chain_catalog();
        let (nodes, edges) = traverse(&catalog, &a, LineageDirection::Output, 1)
            .await
            .unwrap();
        assert!(nodes.contains(&a));
        assert!(nodes.contains(&b));
        assert!(nodes.contains(&d));
        assert!(!nodes.contains(&c));
        assert_eq!(edges.len(), 2);
    }

    #[tokio::test]
    async fn test_depth_monotonic() {
        let (catalog, [a, ..]) = chain_catalog();
        let mut previous: Option<(HashSet<String>, HashSet<LineageRelation>)> = None;
        for depth in [1u64, 2, 3] {
            let current = traverse(&catalog, &a, LineageDirection::Output, depth)
                .await
                .unwrap();
            if let Some((prev_nodes, prev_edges)) = previous {
                assert!(prev_nodes.is_subset(&current.0));
                assert!(prev_edges.is_subset(&current.1));
            }
            previous = Some(current);
        }
        // Unbounded is a superset of every finite depth
        let unbounded = traverse(&catalog, &a, LineageDirection::Output, 0)
            .await
            .unwrap();
        let (last_nodes, last_edges) = previous.unwrap();
        assert!(last_nodes.is_subset(&unbounded.0));
        assert!(last_edges.is_subset(&unbounded.1));
    }

    #[tokio::test]
    async fn test_cycle_terminates_without_duplicates() {
        let catalog = InMemoryCatalog::new();
        let a = table(&catalog, "a");
        let b = table(&catalog, "b");
        let c = table(&catalog, "c");
        catalog.add_relation(LineageRelation::new(&a, &b, OUTPUT_LABEL)).unwrap();
        catalog.add_relation(LineageRelation::new(&b, &c, OUTPUT_LABEL)).unwrap();
        catalog.add_relation(LineageRelation::new(&c, &a, OUTPUT_LABEL)).unwrap();

        let (nodes, edges) = traverse(&catalog, &a, LineageDirection::Output, 0)
            .await
            .unwrap();
        assert_eq!(nodes.len(), 3);
        // The cycle-closing edge c -> a is still recorded exactly once
        assert_eq!(edges.len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_index_edge_counted_once() {
        let catalog = InMemoryCatalog::new();
        let a = table(&catalog, "a");
        let b = table(&catalog, "b");
        let edge = LineageRelation::new(&a, &b, OUTPUT_LABEL);
        catalog.add_relation(edge.clone()).unwrap();
        catalog.add_relation(edge).unwrap();

        let (_, edges) = traverse(&catalog, &a, LineageDirection::Output, 0)
            .await
            .unwrap();
        assert_eq!(edges.len(), 1);
    }

    #[tokio::test]
    async fn test_dangling_edge_dropped_silently() {
        let catalog = InMemoryCatalog::new();
        let a = table(&catalog, "a");
        let b = table(&catalog, "b");
        catalog.add_relation(LineageRelation::new(&a, &b, OUTPUT_LABEL)).unwrap();
        // Edge to a GUID with no entity behind it
        catalog.add_relation(LineageRelation::new(&a, "ghost", OUTPUT_LABEL)).unwrap();

        let (nodes, edges) = traverse(&catalog, &a, LineageDirection::Output, 0)
            .await
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 1);
        assert!(!nodes.contains("ghost"));
    }

    #[tokio::test]
    async fn test_direction_input_follows_only_incoming() {
        let catalog = InMemoryCatalog::new();
        let up = table(&catalog, "up");
        let mid = table(&catalog, "mid");
        let down = table(&catalog, "down");
        catalog.add_relation(LineageRelation::new(&up, &mid, INPUT_LABEL)).unwrap();
        catalog.add_relation(LineageRelation::new(&mid, &down, OUTPUT_LABEL)).unwrap();

        let (nodes, edges) = traverse(&catalog, &mid, LineageDirection::Input, 0)
            .await
            .unwrap();
        assert!(nodes.contains(&up));
        assert!(!nodes.contains(&down));
        assert!(edges.iter().all(|e| e.target_guid == mid));

        let (nodes, edges) = traverse(&catalog, &mid, LineageDirection::Output, 0)
            .await
            .unwrap();
        assert!(nodes.contains(&down));
        assert!(!nodes.contains(&up));
        assert!(edges.iter().all(|e| e.source_guid == mid));

        let (nodes, _) = traverse(&catalog, &mid, LineageDirection::Both, 0)
            .await
            .unwrap();
        assert_eq!(nodes.len(), 3);
    }
}
