use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::store::Document;

/// A registered user. `username` and `email` are unique across the
/// collection; uniqueness is enforced by the data-access layer before
/// insertion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub username: String,
    /// bcrypt hash; the raw password is never stored.
    pub password_hash: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, password_hash: &str, email: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Remove credential fields from a user document before it leaves the
/// data-access layer.
pub fn strip_credentials(document: &mut Document) {
    if let Some(object) = document.as_object_mut() {
        object.remove("password_hash");
    }
}
