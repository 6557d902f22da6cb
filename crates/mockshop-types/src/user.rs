use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::ValidationResult;
use crate::record::{Record, RecordMeta};
use crate::status::{EnumeratedStatus, UserRole};
use crate::validate::{email, non_blank, required_text};

/// A registered customer or administrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub role: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub role: Option<String>,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    type Draft = UserDraft;
    type Patch = UserPatch;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn from_draft(meta: RecordMeta, draft: UserDraft) -> ValidationResult<Self> {
        let name = required_text("name", draft.name)?;
        let mail = required_text("email", draft.email)?;
        email("email", &mail)?;
        if let Some(address) = &draft.address {
            address.validate("address")?;
        }
        let role = match draft.role.as_deref() {
            Some(raw) => UserRole::parse("role", raw)?,
            None => UserRole::default(),
        };
        Ok(Self {
            meta,
            name,
            email: mail.trim().to_string(),
            phone: draft.phone,
            address: draft.address,
            role,
        })
    }

    fn apply_patch(&mut self, patch: UserPatch) -> ValidationResult<()> {
        if let Some(name) = &patch.name {
            non_blank("name", name)?;
        }
        if let Some(mail) = &patch.email {
            email("email", mail)?;
        }
        if let Some(address) = &patch.address {
            address.validate("address")?;
        }
        let role = patch
            .role
            .as_deref()
            .map(|raw| UserRole::parse("role", raw))
            .transpose()?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(mail) = patch.email {
            self.email = mail.trim().to_string();
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if let Some(role) = role {
            self.role = role;
        }
        Ok(())
    }
}
