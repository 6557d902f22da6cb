use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use mockshop_store::UserModel;
use mockshop_types::{EnumeratedStatus, User, UserRole};

use crate::error::{ServerError, ServerResult};
use crate::handler::{create, fetch, list, remove, update};

pub fn router(model: UserModel) -> Router {
    Router::new()
        .route("/", get(list::<UserModel>).post(create::<UserModel>))
        .route(
            "/:id",
            get(fetch::<UserModel>)
                .put(update::<UserModel>)
                .delete(remove::<UserModel>),
        )
        .route("/email/:email", get(by_email))
        .route("/role/:role", get(by_role))
        .with_state(Arc::new(model))
}

async fn by_email(
    State(users): State<Arc<UserModel>>,
    Path(email): Path<String>,
) -> ServerResult<Json<User>> {
    users
        .find_by_email(&email)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::not_found("users", &email))
}

async fn by_role(
    State(users): State<Arc<UserModel>>,
    Path(role): Path<String>,
) -> ServerResult<Json<Vec<User>>> {
    let role = UserRole::parse("role", &role)?;
    Ok(Json(users.get_users_by_role(role).await?))
}
