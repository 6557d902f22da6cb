use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use mockshop_types::{Record, RecordId, RecordMeta, StatusRecord, ValidationResult};

use crate::config::StoreConfig;
use crate::document::{inspect, Document, DocumentHealth, SCHEMA_VERSION_KEY};
use crate::error::{StoreError, StoreResult};
use crate::fs::FsStorage;
use crate::memory::InMemoryStorage;
use crate::query::{encode_record, encode_value, values_equal, SearchCriteria};
use crate::traits::DocumentStorage;

/// Entity store over one JSON collection document.
///
/// Every operation reads the whole document, works on an owned copy, and
/// (for mutations) writes the whole document back through the storage
/// backend's atomic replace. There is no in-process locking: concurrent
/// mutations of the same collection can lose updates.
pub struct JsonStore<R: Record> {
    storage: Arc<dyn DocumentStorage>,
    schema_version: String,
    pretty: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for JsonStore<R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            schema_version: self.schema_version.clone(),
            pretty: self.pretty,
            _record: PhantomData,
        }
    }
}

impl<R: Record> JsonStore<R> {
    /// File-backed store at `<data_dir>/<collection>.json`.
    pub fn open(config: &StoreConfig) -> Self {
        let storage = FsStorage::new(config.document_path(R::COLLECTION), config.sync_on_write);
        Self::with_storage(Arc::new(storage), config)
    }

    /// Store over an arbitrary backend.
    pub fn with_storage(storage: Arc<dyn DocumentStorage>, config: &StoreConfig) -> Self {
        Self {
            storage,
            schema_version: config.schema_version.clone(),
            pretty: config.pretty,
            _record: PhantomData,
        }
    }

    /// Store over fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(InMemoryStorage::new()), &StoreConfig::default())
    }

    pub fn collection(&self) -> &'static str {
        R::COLLECTION
    }

    pub fn location(&self) -> String {
        self.storage.location()
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    // ---- Document lifecycle ----

    /// Make sure a well-formed document exists.
    ///
    /// Absent or malformed content is replaced by an empty document; a
    /// document without a version is patched in place. A healthy document
    /// is left byte-for-byte untouched.
    pub async fn ensure_initialized(&self) -> StoreResult<()> {
        let bytes = self.storage.load().await?;
        match inspect(bytes.as_deref(), R::COLLECTION) {
            DocumentHealth::Healthy => Ok(()),
            DocumentHealth::Absent => {
                info!(collection = R::COLLECTION, location = %self.location(), "creating empty document");
                self.write_document(&Document::empty(&self.schema_version)).await
            }
            DocumentHealth::Malformed(reason) => {
                warn!(
                    collection = R::COLLECTION,
                    location = %self.location(),
                    %reason,
                    "malformed document; replacing with empty document",
                );
                self.write_document(&Document::empty(&self.schema_version)).await
            }
            DocumentHealth::Unversioned(mut map) => {
                info!(
                    collection = R::COLLECTION,
                    version = %self.schema_version,
                    "patching missing schema version",
                );
                map.insert(
                    SCHEMA_VERSION_KEY.to_string(),
                    Value::String(self.schema_version.clone()),
                );
                let encoded = self.encode_value(&Value::Object(map))?;
                self.storage.replace(&encoded).await
            }
        }
    }

    /// Load and decode the document.
    ///
    /// A never-written document is initialized and returned empty. Content
    /// that exists but does not decode is reported, not repaired.
    pub async fn read_document(&self) -> StoreResult<Document<R>> {
        match self.storage.load().await? {
            Some(bytes) => Document::decode(&bytes, &self.location()),
            None => {
                debug!(collection = R::COLLECTION, "document absent on read; initializing");
                self.ensure_initialized().await?;
                Ok(Document::empty(&self.schema_version))
            }
        }
    }

    /// Validate and atomically persist a whole document.
    pub async fn write_document(&self, doc: &Document<R>) -> StoreResult<()> {
        let bytes = doc.encode(self.pretty)?;
        self.storage.replace(&bytes).await?;
        debug!(collection = R::COLLECTION, records = doc.records.len(), "wrote document");
        Ok(())
    }

    fn encode_value(&self, value: &Value) -> StoreResult<Vec<u8>> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        encoded.map_err(|e| StoreError::Serialization(e.to_string()))
    }

    // ---- Queries ----

    /// Every record in stored order.
    pub async fn get_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.read_document().await?.records)
    }

    pub async fn get_by_id(&self, id: &RecordId) -> StoreResult<Option<R>> {
        let doc = self.read_document().await?;
        Ok(doc.records.into_iter().find(|r| r.id() == id))
    }

    /// Records whose top-level `field` equals `value`.
    pub async fn get_by_field<V: Serialize>(&self, field: &str, value: &V) -> StoreResult<Vec<R>> {
        let criteria = SearchCriteria::new().field(field, encode_value(value)?);
        self.search(&criteria).await
    }

    /// Records matching every criterion, in stored order.
    pub async fn search(&self, criteria: &SearchCriteria) -> StoreResult<Vec<R>> {
        let doc = self.read_document().await?;
        let mut hits = Vec::new();
        for record in doc.records {
            let encoded = encode_record(&record)?;
            if criteria.matches(&record, &encoded) {
                hits.push(record);
            }
        }
        debug!(collection = R::COLLECTION, hits = hits.len(), "search");
        Ok(hits)
    }

    /// Count records per value of `field`.
    ///
    /// Every supplied value gets an entry, zero when nothing matches.
    pub async fn count_by_field<V>(&self, field: &str, values: &[V]) -> StoreResult<BTreeMap<V, usize>>
    where
        V: Serialize + Ord + Clone,
    {
        let wanted = values
            .iter()
            .map(|v| Ok((encode_value(v)?, v.clone())))
            .collect::<StoreResult<Vec<(Value, V)>>>()?;
        let mut counts: BTreeMap<V, usize> = values.iter().cloned().map(|v| (v, 0)).collect();

        for record in self.read_document().await?.records {
            let encoded = encode_record(&record)?;
            let Some(actual) = encoded.get(field) else {
                continue;
            };
            if let Some((_, key)) = wanted.iter().find(|(w, _)| values_equal(w, actual)) {
                if let Some(count) = counts.get_mut(key) {
                    *count += 1;
                }
            }
        }
        Ok(counts)
    }

    // ---- Mutations ----

    /// Validate a draft, stamp it, append it, persist.
    pub async fn create(&self, draft: R::Draft) -> StoreResult<R> {
        let record = R::from_draft(RecordMeta::stamp(), draft)?;
        let mut doc = self.read_document().await?;
        doc.records.push(record.clone());
        self.write_document(&doc).await?;
        info!(collection = R::COLLECTION, id = %record.id(), "created record");
        Ok(record)
    }

    /// Merge a patch into the record with `id`.
    ///
    /// `Ok(None)` if there is no such record. A rejected patch writes nothing.
    pub async fn update(&self, id: &RecordId, patch: R::Patch) -> StoreResult<Option<R>> {
        self.modify(id, |record| record.apply_patch(patch)).await
    }

    /// Apply `change` to the record with `id`, refresh `updatedAt`, persist.
    ///
    /// `id` and `createdAt` are restored after `change` runs, so they cannot
    /// be altered through this path.
    pub async fn modify<F>(&self, id: &RecordId, change: F) -> StoreResult<Option<R>>
    where
        F: FnOnce(&mut R) -> ValidationResult<()>,
    {
        let mut doc = self.read_document().await?;
        let Some(index) = doc.position(id) else {
            debug!(collection = R::COLLECTION, %id, "update target not found");
            return Ok(None);
        };

        let mut record = doc.records[index].clone();
        let identity = record.meta().clone();
        change(&mut record)?;
        {
            let meta = record.meta_mut();
            meta.id = identity.id;
            meta.created_at = identity.created_at;
            meta.updated_at = identity.updated_at;
            meta.touch();
        }

        doc.records[index] = record.clone();
        self.write_document(&doc).await?;
        debug!(collection = R::COLLECTION, %id, "updated record");
        Ok(Some(record))
    }

    /// Remove the record with `id`. Returns `false` if it did not exist.
    pub async fn delete(&self, id: &RecordId) -> StoreResult<bool> {
        let mut doc = self.read_document().await?;
        let Some(index) = doc.position(id) else {
            return Ok(false);
        };
        doc.records.remove(index);
        self.write_document(&doc).await?;
        info!(collection = R::COLLECTION, %id, "deleted record");
        Ok(true)
    }
}

impl<R: StatusRecord> JsonStore<R> {
    /// Update only the `status` field, with the entity's status rules.
    pub async fn update_status(&self, id: &RecordId, status: &str) -> StoreResult<Option<R>> {
        self.update(id, R::status_patch(status)).await
    }
}

impl<R: Record> std::fmt::Debug for JsonStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStore")
            .field("collection", &R::COLLECTION)
            .field("storage", &self.storage)
            .field("schema_version", &self.schema_version)
            .finish()
    }
}
