pub mod anime;
pub mod galgame;
pub mod lookup;
pub mod pending;
pub mod status;
pub mod subject;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Provenance;
use serde::Serialize;
use serde_json::{Map, Value};

pub(crate) fn require_provenance(provenance: &Provenance, entity: &str) -> CatalogResult<()> {
    if provenance.is_complete() {
        Ok(())
    } else {
        Err(CatalogError::InvalidData(format!(
            "{entity} requires info_source and id_source, got '{provenance}'"
        )))
    }
}

pub(crate) fn json_object(map: &Map<String, Value>) -> Value {
    Value::Object(map.clone())
}

pub(crate) fn json_list<T: Serialize>(items: &[T]) -> CatalogResult<Value> {
    serde_json::to_value(items).map_err(|e| CatalogError::InvalidData(e.to_string()))
}

/// An association row resolved to the person it credits and the role held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credit<P, R> {
    pub person: P,
    pub role: R,
    pub description: String,
}
