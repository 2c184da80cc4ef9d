pub mod image_payload;

pub use image_payload::ImagePayload;
