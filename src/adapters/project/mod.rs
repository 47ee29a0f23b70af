//! Project files
//!
//! Load and save [`crate::domain::ImageData`] documents.

pub mod store;

pub use store::{load_image_data, save_image_data};
