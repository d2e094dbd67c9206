use utoipa::OpenApi;

use crate::db_access::{
    CheckUserRequest, CreateImageRequest, CreateUserRequest, UpdateEloRequest,
};
use crate::handlers;
use crate::handlers::health::HealthResponse;
use crate::models::{Image, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::users::create_user,
        handlers::users::check_user,
        handlers::users::get_user,
        handlers::images::create_image,
        handlers::images::get_images,
        handlers::images::get_random_image,
        handlers::images::update_image_elo,
    ),
    components(schemas(
        HealthResponse,
        CreateUserRequest,
        CheckUserRequest,
        CreateImageRequest,
        UpdateEloRequest,
        User,
        Image,
    )),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "images", description = "Image submission, retrieval and rating"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Image Arena API",
        description = "Backend API for the Image Arena voting application"
    )
)]
pub struct ApiDoc;
