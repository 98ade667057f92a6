//! Catalog data model: typed entities, display headers, classifications.
//!
//! Entities are opaque-GUID records with a type name and a free-form JSON
//! attribute map (scalars, nested maps, ordered sequences of `{"guid": ...}`
//! references). The catalog is append-oriented; lineage queries only read.

mod source;
mod memory;
mod sqlite;

pub use source::{CatalogIntake, CatalogSource};
pub use memory::InMemoryCatalog;
pub use sqlite::SqliteCatalog;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known entity type names, matching the sample hive-style model.
pub const DATABASE_TYPE: &str = "DB";
pub const TABLE_TYPE: &str = "Table";
pub const COLUMN_TYPE: &str = "Column";
pub const VIEW_TYPE: &str = "View";
pub const LOAD_PROCESS_TYPE: &str = "LoadProcess";

/// A catalogued entity: GUID, type name, attribute map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Globally unique identifier (UUID v4), immutable once assigned.
    pub guid: String,
    /// Type name, e.g. `Table`, `LoadProcess`.
    pub type_name: String,
    /// Attribute map. Values may be scalars, nested maps, or ordered
    /// sequences of `{"guid": ...}` references.
    pub attributes: Map<String, Value>,
}

impl Entity {
    /// Create an entity with a fresh GUID and `name`/`description` attributes.
    pub fn new(type_name: &str, name: &str, description: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), Value::String(name.to_string()));
        attributes.insert(
            "description".to_string(),
            Value::String(description.to_string()),
        );
        Self {
            guid: uuid::Uuid::new_v4().to_string(),
            type_name: type_name.to_string(),
            attributes,
        }
    }

    /// Set an attribute, returning self for chained construction.
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Set an attribute holding an ordered sequence of GUID references.
    pub fn with_refs<S: AsRef<str>>(self, key: &str, guids: &[S]) -> Self {
        let refs: Vec<Value> = guids.iter().map(|g| guid_ref(g.as_ref())).collect();
        self.with_attribute(key, Value::Array(refs))
    }

    /// String attribute accessor.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(|v| v.as_str())
    }

    /// GUIDs referenced by a sequence-of-references attribute, in order.
    pub fn ref_guids(&self, key: &str) -> Vec<String> {
        match self.attributes.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.get("guid").and_then(|g| g.as_str()))
                .map(|g| g.to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Build a `{"guid": ...}` reference value.
pub fn guid_ref(guid: &str) -> Value {
    let mut map = Map::new();
    map.insert("guid".to_string(), Value::String(guid.to_string()));
    Value::Object(map)
}

/// Lightweight display header for an entity, as returned inside lineage
/// results: type name, minimal display attributes, classification names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityHeader {
    pub guid: String,
    pub type_name: String,
    /// Minimal display attributes (`name`, `description` when present).
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Classification type names attached to the entity.
    #[serde(default)]
    pub classifications: Vec<String>,
}

impl EntityHeader {
    /// Project a full entity down to its display header.
    pub fn from_entity(entity: &Entity, classifications: Vec<String>) -> Self {
        let mut attributes = Map::new();
        for key in ["name", "description"] {
            if let Some(value) = entity.attributes.get(key) {
                attributes.insert(key.to_string(), value.clone());
            }
        }
        Self {
            guid: entity.guid.clone(),
            type_name: entity.type_name.clone(),
            attributes,
            classifications,
        }
    }

    /// Display name, falling back to the GUID.
    pub fn display_name(&self) -> &str {
        self.attributes
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(&self.guid)
    }
}
