use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use mockshop_types::Record;

use crate::error::{StoreError, StoreResult};

/// Conjunctive record filter: every supplied criterion must match.
///
/// Field names are top-level wire names (`userId`, `status`). Equality is
/// exact JSON value equality, except that numbers compare by value (`10`
/// matches `10.0`). The `createdAt` bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchCriteria {
    pub fields: Vec<(String, Value)>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.created_to = Some(to);
        self
    }

    /// `true` if no criterion is set (matches every record).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.created_from.is_none() && self.created_to.is_none()
    }

    /// Evaluate against a record and its encoded form.
    pub(crate) fn matches<R: Record>(&self, record: &R, encoded: &Value) -> bool {
        let created = record.meta().created_at;
        if self.created_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| created > to) {
            return false;
        }
        self.fields
            .iter()
            .all(|(field, expected)| encoded.get(field).is_some_and(|actual| values_equal(actual, expected)))
    }
}

/// JSON equality with integer and float encodings of a number treated alike.
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Encode a record to JSON for field-level comparisons.
pub(crate) fn encode_record<R: Record>(record: &R) -> StoreResult<Value> {
    serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Encode a lookup value.
pub(crate) fn encode_value<V: Serialize>(value: &V) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}
