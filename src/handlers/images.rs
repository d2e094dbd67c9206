use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};

use crate::AppState;
use crate::db_access::{CreateImageRequest, DbResponse, ImageQuery, UpdateEloRequest};
use crate::error::{Result, handle_rejection};

/// Submit a generated image for voting.
#[utoipa::path(
    post,
    path = "/create_image",
    tag = "images",
    request_body = CreateImageRequest,
    responses(
        (status = 201, description = "Image created"),
        (status = 400, description = "Payload failed validation"),
        (status = 404, description = "Creator user does not exist"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_image(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateImageRequest>, JsonRejection>,
) -> Result<DbResponse> {
    let Json(request) = payload.map_err(handle_rejection)?;
    Ok(state.db.create_image(request).await)
}

/// Fetch a single image by id, or a bounded listing by limit, optionally
/// scoped to one creator.
#[utoipa::path(
    get,
    path = "/get_images",
    tag = "images",
    params(ImageQuery),
    responses(
        (status = 200, description = "Image(s) retrieved"),
        (status = 404, description = "No image with that id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_images(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> DbResponse {
    state.db.get_images(query).await
}

/// Sample one image at random for the voting page.
#[utoipa::path(
    get,
    path = "/get_random_image",
    tag = "images",
    responses(
        (status = 200, description = "Image selected"),
        (status = 404, description = "No images available"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_random_image(State(state): State<AppState>) -> DbResponse {
    state.db.get_random_image().await
}

/// Apply the Elo exchange from a vote to both images.
#[utoipa::path(
    post,
    path = "/update_image_elo",
    tag = "images",
    request_body = UpdateEloRequest,
    responses(
        (status = 200, description = "Ratings updated"),
        (status = 404, description = "One of the images does not exist"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_image_elo(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpdateEloRequest>, JsonRejection>,
) -> Result<DbResponse> {
    let Json(request) = payload.map_err(handle_rejection)?;
    Ok(state.db.update_image_elo(request).await)
}
