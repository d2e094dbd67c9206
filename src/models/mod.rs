// Document models stored in the users and images collections.

pub mod image;
pub mod user;

pub use image::Image;
pub use user::User;
