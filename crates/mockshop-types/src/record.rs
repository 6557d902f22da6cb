use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{TypeError, ValidationResult};

/// Identifier of a record within its collection.
///
/// New ids are UUID v7 strings, so ids generated by one process sort by
/// creation time. Ids read back from disk are accepted as any non-empty
/// string; the store never rewrites them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh, time-ordered id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an id supplied by a caller (path parameter, stored document).
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.short_id())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse an RFC 3339 timestamp, e.g. from a query string.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TypeError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TypeError::InvalidTimestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Identity and bookkeeping fields shared by every record.
///
/// Flattened into each entity so that `id`, `createdAt` and `updatedAt`
/// sit at the top level of the record on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Stamp a brand new record: fresh id, `createdAt == updatedAt == now`.
    pub fn stamp() -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updatedAt`.
    ///
    /// The new value is strictly greater than the previous one even if the
    /// wall clock has not advanced (or has stepped backwards).
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// An entity persisted in a collection document.
///
/// Implementors own their domain rules: which draft fields are required,
/// which defaults apply, and which patch values are acceptable. The store
/// only calls these hooks and persists the outcome.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key of the records array in the collection document (`"orders"`).
    const COLLECTION: &'static str;

    /// Creation input. Every field is optional at the decoding layer so
    /// that missing required fields surface as validation errors.
    type Draft: DeserializeOwned + Send;

    /// Partial update. Present fields overwrite, absent fields are kept.
    type Patch: DeserializeOwned + Send;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Validate a draft and build the record around pre-stamped metadata.
    fn from_draft(meta: RecordMeta, draft: Self::Draft) -> ValidationResult<Self>;

    /// Validate a patch and merge it into `self`.
    ///
    /// On error `self` must be left unchanged.
    fn apply_patch(&mut self, patch: Self::Patch) -> ValidationResult<()>;

    fn id(&self) -> &RecordId {
        &self.meta().id
    }
}

/// A record with an enumerated `status` field.
pub trait StatusRecord: Record {
    /// Build a patch that only touches `status`.
    fn status_patch(status: &str) -> Self::Patch;
}
