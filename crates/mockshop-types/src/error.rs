use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// A domain invariant violated by caller-supplied data.
///
/// Every variant names the offending field using its wire (camelCase) name,
/// so the message can be handed back to an API client unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid {field} {value:?}: expected one of [{allowed}]")]
    InvalidStatus {
        field: String,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The wire name of the field this error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::InvalidValue { field, .. }
            | Self::InvalidStatus { field, .. } => field,
        }
    }
}

/// Result alias for domain validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ValidationError::missing("userId");
        assert_eq!(err.field(), "userId");
        assert_eq!(err.to_string(), "missing required field: userId");
    }

    #[test]
    fn invalid_status_lists_allowed_values() {
        let err = ValidationError::InvalidStatus {
            field: "status".into(),
            value: "bogus".into(),
            allowed: "pending, shipped".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"bogus\""));
        assert!(msg.contains("pending, shipped"));
    }
}
