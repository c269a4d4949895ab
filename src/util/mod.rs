//! Utility modules

pub mod files;

pub use files::{
    filename_for_display, images_in_dir, is_image_file, neighbor_image, sibling_images,
    validate_image_path, ImageOpenError,
};
