//! Provenance lineage module: directed graph types and BFS traversal.
//!
//! Computes the connected provenance subgraph around a starting entity
//! (bounded breadth-first walk over the relation index) and assembles it
//! into an entity-header map plus a deduplicated relation set.

mod extraction;
mod traversal;
mod query;

pub use extraction::relations_from_process;
pub use traversal::traverse;
pub use query::get_lineage;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::EntityHeader;
use crate::error::MetacatError;

/// Edge label for dataset -> process consumption edges.
pub const INPUT_LABEL: &str = "INPUT";
/// Edge label for process -> dataset production edges.
pub const OUTPUT_LABEL: &str = "OUTPUT";

/// Which edge orientation(s) a traversal follows from each frontier node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LineageDirection {
    /// Upstream only: follow edges where the frontier node is the target.
    Input,
    /// Downstream only: follow edges where the frontier node is the source.
    Output,
    /// Both orientations.
    Both,
}

impl fmt::Display for LineageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineageDirection::Input => write!(f, "INPUT"),
            LineageDirection::Output => write!(f, "OUTPUT"),
            LineageDirection::Both => write!(f, "BOTH"),
        }
    }
}

impl FromStr for LineageDirection {
    type Err = MetacatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(LineageDirection::Input),
            "output" => Ok(LineageDirection::Output),
            "both" => Ok(LineageDirection::Both),
            other => Err(MetacatError::InvalidInput(format!(
                "unknown lineage direction: {} (expected input, output or both)",
                other
            ))),
        }
    }
}

/// A single directed provenance edge (source --label--> target).
///
/// Identity is the full (source, target, label) triple; a repeated edge from
/// the relation index contributes only once to a lineage result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineageRelation {
    pub source_guid: String,
    pub target_guid: String,
    /// Edge-type label, e.g. `INPUT`, `OUTPUT`.
    pub label: String,
}

impl LineageRelation {
    pub fn new(source_guid: &str, target_guid: &str, label: &str) -> Self {
        Self {
            source_guid: source_guid.to_string(),
            target_guid: target_guid.to_string(),
            label: label.to_string(),
        }
    }

    /// The endpoint opposite to `guid`. Returns `None` when `guid` is
    /// neither endpoint.
    pub fn far_endpoint<'a>(&'a self, guid: &str) -> Option<&'a str> {
        if self.source_guid == guid {
            Some(&self.target_guid)
        } else if self.target_guid == guid {
            Some(&self.source_guid)
        } else {
            None
        }
    }
}

/// The assembled result of a lineage query.
///
/// `guid_entity_map` covers every visited node, start node included, and
/// every GUID referenced by `relations` is a key of the map. Neither
/// collection promises an enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageResult {
    pub base_entity_guid: String,
    pub lineage_direction: LineageDirection,
    /// The depth bound the query ran with (0 = unbounded).
    pub lineage_depth: i64,
    pub guid_entity_map: HashMap<String, EntityHeader>,
    pub relations: HashSet<LineageRelation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("both".parse::<LineageDirection>().unwrap(), LineageDirection::Both);
        assert_eq!("INPUT".parse::<LineageDirection>().unwrap(), LineageDirection::Input);
        assert_eq!("Output".parse::<LineageDirection>().unwrap(), LineageDirection::Output);
        assert!("sideways".parse::<LineageDirection>().is_err());
    }

    #[test]
    fn test_direction_display_roundtrip() {
        for d in [LineageDirection::Input, LineageDirection::Output, LineageDirection::Both] {
            assert_eq!(d.to_string().parse::<LineageDirection>().unwrap(), d);
        }
    }

    #[test]
    fn test_relation_identity_dedup() {
        let mut set = HashSet::new();
        set.insert(LineageRelation::new("a", "b", INPUT_LABEL));
        set.insert(LineageRelation::new("a", "b", INPUT_LABEL));
        set.insert(LineageRelation::new("a", "b", OUTPUT_LABEL));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_far_endpoint() {
        let rel = LineageRelation::new("a", "b", INPUT_LABEL);
        assert_eq!(rel.far_endpoint("a"), Some("b"));
        assert_eq!(rel.far_endpoint("b"), Some("a"));
        assert_eq!(rel.far_endpoint("c"), None);
    }
}
