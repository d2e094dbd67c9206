//! Data-access operations for the users and images collections.
//!
//! Every operation validates its payload, performs its document-store calls,
//! and returns a [`DbResponse`] carrying an HTTP-style status code and a
//! message. Responses are constructed at each call site: no store error
//! escapes an operation, every storage failure maps to a 500 response, and
//! domain conditions (duplicate field, missing referenced user) map to
//! 401/404.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Image, User, user::strip_credentials};
use crate::store::{DocumentStore, StoreError, collections};

/// Default page size for image listings without an explicit limit.
const DEFAULT_IMAGE_LIMIT: usize = 20;

/// Outcome of a data-access operation.
#[derive(Debug)]
pub struct DbResponse {
    pub status_code: StatusCode,
    pub message: String,
    pub data: Option<Value>,
}

impl DbResponse {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(status_code: StatusCode, message: impl Into<String>, data: Value) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: Some(data),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn storage_failure(operation: &str, err: StoreError) -> Self {
        error!(operation = %operation, error = %err, "Storage operation failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    }
}

impl IntoResponse for DbResponse {
    fn into_response(self) -> Response {
        let mut body = json!({ "message": self.message });
        if let Some(data) = self.data {
            body["data"] = data;
        }
        (self.status_code, Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "casey")]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(email)]
    #[schema(example = "casey@example.com")]
    pub email: String,
}

/// Availability probe; either field may be empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CheckUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetUserRequest {
    pub username: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateImageRequest {
    /// Identifier of the user that generated the image.
    pub creator: String,

    #[validate(length(min = 1))]
    pub prompt: String,

    #[validate(length(min = 1))]
    pub url: String,

    #[validate(range(min = 0))]
    #[schema(example = 1000)]
    pub elo: i64,
}

/// Image lookup: a single document by `id`, or a bounded listing by
/// `limit`, optionally scoped to one creator (the portfolio view).
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ImageQuery {
    pub id: Option<String>,
    pub limit: Option<usize>,
    pub creator: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEloRequest {
    #[serde(rename = "imageIdOne")]
    pub image_id_one: String,
    #[serde(rename = "newEloOne")]
    #[validate(range(min = 0))]
    pub new_elo_one: i64,
    #[serde(rename = "imageIdTwo")]
    pub image_id_two: String,
    #[serde(rename = "newEloTwo")]
    #[validate(range(min = 0))]
    pub new_elo_two: i64,
}

/// Data-access façade over the document store.
#[derive(Clone)]
pub struct DbAccess {
    store: Arc<dyn DocumentStore>,
}

impl DbAccess {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Reachability probe against the underlying store.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    /// Return the 401 conflict response when the username or email is
    /// already registered. Empty fields never conflict.
    async fn uniqueness_conflict(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<DbResponse>, StoreError> {
        if !username.is_empty() {
            let existing = self
                .store
                .find_one(collections::USERS, &json!({ "username": username }))
                .await?;
            if existing.is_some() {
                return Ok(Some(DbResponse::new(
                    StatusCode::UNAUTHORIZED,
                    "Username already taken.",
                )));
            }
        }
        if !email.is_empty() {
            let existing = self
                .store
                .find_one(collections::USERS, &json!({ "email": email }))
                .await?;
            if existing.is_some() {
                return Ok(Some(DbResponse::new(
                    StatusCode::UNAUTHORIZED,
                    "Email already in use.",
                )));
            }
        }
        Ok(None)
    }

    /// Register a new user. 201 on success, 401 on a username/email
    /// conflict, 500 on a storage failure.
    pub async fn create_user(&self, request: CreateUserRequest) -> DbResponse {
        if let Err(e) = request.validate() {
            return DbResponse::bad_request(format!("Validation error: {}", e));
        }

        match self
            .uniqueness_conflict(&request.username, &request.email)
            .await
        {
            Ok(Some(conflict)) => return conflict,
            Ok(None) => {}
            Err(e) => return DbResponse::storage_failure("create_user", e),
        }

        let password_hash = match bcrypt::hash(&request.password, bcrypt::DEFAULT_COST) {
            Ok(hash) => hash,
            Err(e) => {
                error!(error = %e, "Password hashing failed");
                return DbResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.",
                );
            }
        };

        let user = User::new(&request.username, &password_hash, &request.email);
        let document = match serde_json::to_value(&user) {
            Ok(document) => document,
            Err(e) => return DbResponse::storage_failure("create_user", e.into()),
        };

        match self.store.insert(collections::USERS, document).await {
            Ok(id) => {
                info!(user_id = %id, username = %user.username, "User created");
                DbResponse::with_data(StatusCode::CREATED, "User created.", json!({ "id": id }))
            }
            Err(e) => DbResponse::storage_failure("create_user", e),
        }
    }

    /// Check username/email availability. 401 naming the conflicting field
    /// when taken, 200 when both are free.
    pub async fn check_user(&self, request: CheckUserRequest) -> DbResponse {
        match self
            .uniqueness_conflict(&request.username, &request.email)
            .await
        {
            Ok(Some(conflict)) => conflict,
            Ok(None) => DbResponse::new(StatusCode::OK, "Username and email are available."),
            Err(e) => DbResponse::storage_failure("check_user", e),
        }
    }

    /// Look up a user by username. 200 with the document (credentials
    /// stripped) on a match, 404 otherwise.
    pub async fn get_user(&self, request: GetUserRequest) -> DbResponse {
        let filter = json!({ "username": request.username });
        match self.store.find_one(collections::USERS, &filter).await {
            Ok(Some(mut document)) => {
                strip_credentials(&mut document);
                DbResponse::with_data(StatusCode::OK, "User found.", document)
            }
            Ok(None) => DbResponse::new(StatusCode::NOT_FOUND, "User not found."),
            Err(e) => DbResponse::storage_failure("get_user", e),
        }
    }

    /// Submit an image. The creator reference is resolved first: 404 when
    /// the user does not exist, 201 on insertion, 500 on a storage failure
    /// during resolution or insertion.
    pub async fn create_image(&self, request: CreateImageRequest) -> DbResponse {
        if let Err(e) = request.validate() {
            return DbResponse::bad_request(format!("Validation error: {}", e));
        }

        let creator = json!({ "id": request.creator });
        match self.store.find_one(collections::USERS, &creator).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return DbResponse::new(StatusCode::NOT_FOUND, "Creator user does not exist.");
            }
            Err(e) => return DbResponse::storage_failure("create_image", e),
        }

        let image = Image::new(&request.creator, &request.prompt, &request.url, request.elo);
        let document = match serde_json::to_value(&image) {
            Ok(document) => document,
            Err(e) => return DbResponse::storage_failure("create_image", e.into()),
        };

        match self.store.insert(collections::IMAGES, document).await {
            Ok(id) => {
                info!(image_id = %id, creator = %image.creator, "Image created");
                DbResponse::with_data(StatusCode::CREATED, "Image created.", json!({ "id": id }))
            }
            Err(e) => DbResponse::storage_failure("create_image", e),
        }
    }

    /// Fetch images: by `id` for a single document, otherwise a listing
    /// bounded by `limit`, scoped to `creator` when given.
    pub async fn get_images(&self, query: ImageQuery) -> DbResponse {
        if let Some(id) = query.id {
            let filter = json!({ "id": id });
            return match self.store.find_one(collections::IMAGES, &filter).await {
                Ok(Some(document)) => {
                    DbResponse::with_data(StatusCode::OK, "Image found.", document)
                }
                Ok(None) => DbResponse::new(StatusCode::NOT_FOUND, "Image not found."),
                Err(e) => DbResponse::storage_failure("get_images", e),
            };
        }

        let filter = match query.creator {
            Some(creator) => json!({ "creator": creator }),
            None => json!({}),
        };
        let limit = query.limit.unwrap_or(DEFAULT_IMAGE_LIMIT);
        match self
            .store
            .find_many(collections::IMAGES, &filter, limit)
            .await
        {
            Ok(documents) => {
                DbResponse::with_data(StatusCode::OK, "Images retrieved.", Value::Array(documents))
            }
            Err(e) => DbResponse::storage_failure("get_images", e),
        }
    }

    /// Sample one image at random. 404 when the collection is empty.
    pub async fn get_random_image(&self) -> DbResponse {
        match self.store.sample_one(collections::IMAGES).await {
            Ok(Some(document)) => DbResponse::with_data(StatusCode::OK, "Image found.", document),
            Ok(None) => DbResponse::new(StatusCode::NOT_FOUND, "No images available."),
            Err(e) => DbResponse::storage_failure("get_random_image", e),
        }
    }

    /// Apply the Elo exchange computed by the voting frontend to both
    /// images. Both ids must resolve before either document is written.
    pub async fn update_image_elo(&self, request: UpdateEloRequest) -> DbResponse {
        if let Err(e) = request.validate() {
            return DbResponse::bad_request(format!("Validation error: {}", e));
        }

        for id in [&request.image_id_one, &request.image_id_two] {
            match self
                .store
                .find_one(collections::IMAGES, &json!({ "id": id }))
                .await
            {
                Ok(Some(_)) => {}
                Ok(None) => return DbResponse::new(StatusCode::NOT_FOUND, "Image not found."),
                Err(e) => return DbResponse::storage_failure("update_image_elo", e),
            }
        }

        let updates = [
            (&request.image_id_one, request.new_elo_one),
            (&request.image_id_two, request.new_elo_two),
        ];
        for (id, elo) in updates {
            if let Err(e) = self
                .store
                .update_one(collections::IMAGES, &json!({ "id": id }), &json!({ "elo": elo }))
                .await
            {
                return DbResponse::storage_failure("update_image_elo", e);
            }
        }

        DbResponse::new(StatusCode::OK, "Ratings updated.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn db() -> DbAccess {
        DbAccess::new(Arc::new(MemoryStore::new("db_access_test")))
    }

    fn user_request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: "hunter2!".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_user_rejects_invalid_email() {
        let db = db();
        let response = db.create_user(user_request("casey", "not-an-email")).await;
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_user_hashes_password_before_storage() {
        let store = Arc::new(MemoryStore::new("db_access_test"));
        let db = DbAccess::new(store.clone());

        let response = db.create_user(user_request("casey", "casey@example.com")).await;
        assert_eq!(response.status_code, StatusCode::CREATED);

        let stored = store
            .find_one(collections::USERS, &json!({ "username": "casey" }))
            .await
            .expect("find failed")
            .expect("user missing");
        let hash = stored["password_hash"].as_str().expect("hash missing");
        assert_ne!(hash, "hunter2!");
        assert!(bcrypt::verify("hunter2!", hash).expect("verify failed"));
    }

    #[tokio::test]
    async fn create_user_enforces_username_uniqueness() {
        let db = db();
        db.create_user(user_request("casey", "casey@example.com")).await;

        let response = db.create_user(user_request("casey", "other@example.com")).await;
        assert_eq!(response.status_code, StatusCode::UNAUTHORIZED);
        assert!(response.message.contains("Username"));
    }

    #[tokio::test]
    async fn get_user_strips_credentials() {
        let db = db();
        db.create_user(user_request("casey", "casey@example.com")).await;

        let response = db
            .get_user(GetUserRequest {
                username: "casey".to_string(),
            })
            .await;
        assert_eq!(response.status_code, StatusCode::OK);
        assert_eq!(response.message, "User found.");

        let data = response.data.expect("data missing");
        assert!(data.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn update_image_elo_is_all_or_nothing() {
        let store = Arc::new(MemoryStore::new("db_access_test"));
        let db = DbAccess::new(store.clone());

        store
            .insert(collections::IMAGES, json!({ "id": "img-1", "elo": 1000 }))
            .await
            .expect("insert failed");

        let response = db
            .update_image_elo(UpdateEloRequest {
                image_id_one: "img-1".to_string(),
                new_elo_one: 1016,
                image_id_two: "ghost".to_string(),
                new_elo_two: 984,
            })
            .await;
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);

        // The resolvable image must be untouched.
        let doc = store
            .find_one(collections::IMAGES, &json!({ "id": "img-1" }))
            .await
            .expect("find failed")
            .expect("image missing");
        assert_eq!(doc["elo"], 1000);
    }
}
