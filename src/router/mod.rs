use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;
use crate::error::ApiError;
use crate::handlers::{health, images, users};
use crate::openapi::ApiDoc;

/// Build the application router with tracing, timeout and CORS layers.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/create_user", post(users::create_user))
        .route("/check_user", post(users::check_user))
        .route("/get_user", get(users::get_user))
        .route("/create_image", post(images::create_image))
        .route("/get_images", get(images::get_images))
        .route("/get_random_image", get(images::get_random_image))
        .route("/update_image_elo", post(images::update_image_elo))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { ApiError::not_found("Route") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
