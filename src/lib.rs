pub mod config;
pub mod db_access;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod router;
pub mod store;

pub use config::Config;
pub use db_access::DbAccess;
pub use error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbAccess,
    pub config: Config,
}
