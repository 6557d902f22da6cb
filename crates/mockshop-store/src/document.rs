//! The on-disk collection document.
//!
//! ```json
//! { "schemaVersion": "1.0", "orders": [ { "id": "...", ... } ] }
//! ```
//!
//! The records array is keyed by the entity's collection name. Unknown
//! top-level keys are carried through reads and writes untouched.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use mockshop_types::Record;

use crate::error::{StoreError, StoreResult};

/// Version stamped into documents created by this crate.
pub const DEFAULT_SCHEMA_VERSION: &str = "1.0";

/// Top-level key holding the schema version.
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

/// A decoded collection document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<R> {
    pub schema_version: Option<String>,
    pub records: Vec<R>,
    /// Top-level keys other than the version and the records array.
    pub extra: Map<String, Value>,
}

impl<R: Record> Document<R> {
    /// A document with no records.
    pub fn empty(schema_version: impl Into<String>) -> Self {
        Self {
            schema_version: Some(schema_version.into()),
            records: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Decode raw document bytes read from `location`.
    ///
    /// Unparseable content, a non-object top level, or a record that does
    /// not decode as `R` is corruption. A missing or non-array records key
    /// is a schema error.
    pub fn decode(bytes: &[u8], location: &str) -> StoreResult<Self> {
        let corrupt = |reason: String| StoreError::Corruption {
            location: location.to_string(),
            reason,
        };

        let value: Value = serde_json::from_slice(bytes).map_err(|e| corrupt(e.to_string()))?;
        let Value::Object(mut map) = value else {
            return Err(corrupt("top level is not an object".to_string()));
        };

        let records = match map.remove(R::COLLECTION) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(StoreError::Schema(format!(
                    "`{}` in {location} is not an array",
                    R::COLLECTION
                )))
            }
            None => {
                return Err(StoreError::Schema(format!(
                    "document {location} has no `{}` array",
                    R::COLLECTION
                )))
            }
        };

        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<R>(item)
                    .map_err(|e| corrupt(format!("{}[{i}]: {e}", R::COLLECTION)))
            })
            .collect::<StoreResult<Vec<R>>>()?;

        let schema_version = match map.remove(SCHEMA_VERSION_KEY) {
            Some(Value::String(v)) => Some(v),
            _ => None,
        };

        Ok(Self {
            schema_version,
            records,
            extra: map,
        })
    }

    /// Check the required top-level shape before writing.
    pub fn validate(&self) -> StoreResult<()> {
        match self.schema_version.as_deref() {
            Some(v) if !v.trim().is_empty() => Ok(()),
            Some(_) => Err(StoreError::Schema(format!("`{SCHEMA_VERSION_KEY}` is empty"))),
            None => Err(StoreError::Schema(format!("`{SCHEMA_VERSION_KEY}` is missing"))),
        }
    }

    /// Validate and serialize.
    pub fn encode(&self, pretty: bool) -> StoreResult<Vec<u8>> {
        self.validate()?;
        let encoded = if pretty {
            serde_json::to_vec_pretty(self)
        } else {
            serde_json::to_vec(self)
        };
        encoded.map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn find(&self, id: &mockshop_types::RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: &mockshop_types::RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl<R: Record> Serialize for Document<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(version) = &self.schema_version {
            map.serialize_entry(SCHEMA_VERSION_KEY, version)?;
        }
        map.serialize_entry(R::COLLECTION, &self.records)?;
        for (key, value) in &self.extra {
            if key != SCHEMA_VERSION_KEY && key != R::COLLECTION {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Condition of the stored bytes as seen by initialization.
#[derive(Debug)]
pub(crate) enum DocumentHealth {
    Absent,
    /// Unparseable, not an object, or no records array.
    Malformed(String),
    /// Valid records array but no string `schemaVersion`; carries the
    /// parsed top level so it can be patched in place.
    Unversioned(Map<String, Value>),
    Healthy,
}

/// Classify raw content for `collection` without decoding individual records.
pub(crate) fn inspect(bytes: Option<&[u8]>, collection: &str) -> DocumentHealth {
    let Some(bytes) = bytes else {
        return DocumentHealth::Absent;
    };
    let map = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return DocumentHealth::Malformed("top level is not an object".to_string()),
        Err(e) => return DocumentHealth::Malformed(e.to_string()),
    };
    if !map.get(collection).is_some_and(Value::is_array) {
        return DocumentHealth::Malformed(format!("no `{collection}` array"));
    }
    if map.get(SCHEMA_VERSION_KEY).is_some_and(Value::is_string) {
        DocumentHealth::Healthy
    } else {
        DocumentHealth::Unversioned(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockshop_types::{Product, ProductDraft, RecordMeta};
    use serde_json::json;

    fn product(name: &str) -> Product {
        Product::from_draft(
            RecordMeta::stamp(),
            ProductDraft {
                name: Some(name.into()),
                price: Some(1.0),
                category: Some("misc".into()),
                ..ProductDraft::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn encode_uses_collection_key() {
        let mut doc = Document::<Product>::empty("1.0");
        doc.records.push(product("a"));
        let value: Value = serde_json::from_slice(&doc.encode(false).unwrap()).unwrap();
        assert_eq!(value["schemaVersion"], "1.0");
        assert_eq!(value["products"].as_array().unwrap().len(), 1);
        assert!(value.get("records").is_none());
    }

    #[test]
    fn decode_roundtrip_preserves_order_and_extras() {
        let mut doc = Document::<Product>::empty("1.0");
        doc.records = vec![product("a"), product("b"), product("c")];
        doc.extra.insert("owner".into(), json!("ops"));
        let bytes = doc.encode(true).unwrap();
        let back = Document::<Product>::decode(&bytes, "test").unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn decode_garbage_is_corruption() {
        let err = Document::<Product>::decode(b"{not json", "p.json").unwrap_err();
        assert!(matches!(err, StoreError::Corruption { ref location, .. } if location == "p.json"));
    }

    #[test]
    fn decode_array_top_level_is_corruption() {
        let err = Document::<Product>::decode(b"[]", "p.json").unwrap_err();
        assert_eq!(err.kind(), "corruption");
    }

    #[test]
    fn decode_without_records_is_schema_error() {
        let err = Document::<Product>::decode(br#"{"schemaVersion":"1.0"}"#, "p.json").unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)));
    }

    #[test]
    fn decode_bad_record_is_corruption_naming_index() {
        let bytes = br#"{"schemaVersion":"1.0","products":[{"id":"x"}]}"#;
        let err = Document::<Product>::decode(bytes, "p.json").unwrap_err();
        match err {
            StoreError::Corruption { reason, .. } => assert!(reason.starts_with("products[0]")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn encode_without_version_is_schema_error() {
        let doc = Document::<Product> {
            schema_version: None,
            records: vec![],
            extra: Map::new(),
        };
        assert!(matches!(doc.encode(false), Err(StoreError::Schema(_))));
        let blank = Document::<Product>::empty("  ");
        assert!(matches!(blank.encode(false), Err(StoreError::Schema(_))));
    }

    #[test]
    fn inspect_classifies_content() {
        assert!(matches!(inspect(None, "orders"), DocumentHealth::Absent));
        assert!(matches!(inspect(Some(b"nope"), "orders"), DocumentHealth::Malformed(_)));
        assert!(matches!(
            inspect(Some(br#"{"schemaVersion":"1.0"}"#), "orders"),
            DocumentHealth::Malformed(_)
        ));
        assert!(matches!(
            inspect(Some(br#"{"orders":{}}"#), "orders"),
            DocumentHealth::Malformed(_)
        ));
        assert!(matches!(
            inspect(Some(br#"{"orders":[]}"#), "orders"),
            DocumentHealth::Unversioned(_)
        ));
        assert!(matches!(
            inspect(Some(br#"{"schemaVersion":"1.0","orders":[]}"#), "orders"),
            DocumentHealth::Healthy
        ));
    }
}
