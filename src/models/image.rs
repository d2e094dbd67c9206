use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A generated image submitted to the arena. `creator` references an
/// existing [`User`](crate::models::User) id; the reference is resolved
/// before insertion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Image {
    pub id: String,
    pub creator: String,
    pub prompt: String,
    pub url: String,
    /// Elo rating adjusted by the voting frontend.
    pub elo: i64,
    pub created_at: DateTime<Utc>,
}

impl Image {
    pub fn new(creator: &str, prompt: &str, url: &str, elo: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            creator: creator.to_string(),
            prompt: prompt.to_string(),
            url: url.to_string(),
            elo,
            created_at: Utc::now(),
        }
    }
}
