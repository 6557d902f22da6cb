use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// A closed set of string values stored in a record field.
pub trait EnumeratedStatus: Copy + Eq + Ord + Serialize + fmt::Debug + 'static {
    /// Every valid value, in display order.
    const ALL: &'static [Self];

    /// Wire representation.
    fn as_str(&self) -> &'static str;

    /// Parse a wire value, naming `field` in the error.
    fn parse(field: &str, value: &str) -> ValidationResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidStatus {
                field: field.to_string(),
                value: value.to_string(),
                allowed: Self::allowed(),
            })
    }

    /// Comma-separated list of valid values.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! status_display {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Lifecycle of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl EnumeratedStatus for OrderStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

status_display!(OrderStatus);

/// Lifecycle of a shopping cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CartStatus {
    Active,
    CheckedOut,
    Abandoned,
}

impl Default for CartStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl EnumeratedStatus for CartStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::CheckedOut, Self::Abandoned];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CheckedOut => "checkedOut",
            Self::Abandoned => "abandoned",
        }
    }
}

status_display!(CartStatus);

/// Account role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Customer,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

impl EnumeratedStatus for UserRole {
    const ALL: &'static [Self] = &[Self::Customer, Self::Admin];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

status_display!(UserRole);
