pub mod image;
pub mod nutrition;
pub mod recognition;
