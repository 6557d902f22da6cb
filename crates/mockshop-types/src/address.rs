use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::validate::non_blank;

/// Postal address embedded in users and orders.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    /// Check `street` and `city`, reporting them as `<prefix>.street` etc.
    pub fn validate(&self, prefix: &str) -> ValidationResult<()> {
        non_blank(&format!("{prefix}.street"), &self.street)?;
        non_blank(&format!("{prefix}.city"), &self.city)?;
        Ok(())
    }
}
