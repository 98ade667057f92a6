//! Relation extraction from process entity attributes.

use crate::catalog::{Entity, LOAD_PROCESS_TYPE};
use crate::lineage::{LineageRelation, INPUT_LABEL, OUTPUT_LABEL};

/// Derive provenance edges from a process entity's `inputs`/`outputs`
/// reference attributes: each consumed dataset points at the process with an
/// `INPUT` edge, the process points at each produced dataset with an
/// `OUTPUT` edge. Non-process entities yield no edges.
pub fn relations_from_process(entity: &Entity) -> Vec<LineageRelation> {
    if entity.type_name != LOAD_PROCESS_TYPE {
        return Vec::new();
    }

    let mut relations = Vec::new();

    for input in entity.ref_guids("inputs") {
        relations.push(LineageRelation::new(&input, &entity.guid, INPUT_LABEL));
    }

    for output in entity.ref_guids("outputs") {
        relations.push(LineageRelation::new(&entity.guid, &output, OUTPUT_LABEL));
    }

    relations
}
