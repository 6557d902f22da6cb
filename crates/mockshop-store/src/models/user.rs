use mockshop_types::{User, UserRole};

use crate::error::StoreResult;
use crate::store::JsonStore;

/// Users collection (`users.json`).
#[derive(Clone, Debug)]
pub struct UserModel {
    store: JsonStore<User>,
}

entity_model!(UserModel, User);

impl UserModel {
    /// First user whose email matches, ignoring case and surrounding spaces.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let wanted = email.trim().to_lowercase();
        Ok(self
            .store
            .get_all()
            .await?
            .into_iter()
            .find(|u| u.email.to_lowercase() == wanted))
    }

    pub async fn get_users_by_role(&self, role: UserRole) -> StoreResult<Vec<User>> {
        self.store.get_by_field("role", &role).await
    }
}
