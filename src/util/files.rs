//! Image file discovery and validation
//!
//! Checks a path before decoding and lists the images that sit next to it,
//! so the host can step through a directory.

use std::fs;
use std::path::{Path, PathBuf};

/// Image file extensions the decoder understands
const IMAGE_EXTENSIONS: &[&str] = &["png", "apng", "jpg", "jpeg", "gif", "bmp", "webp", "ico"];

/// Errors that can occur when validating a path for opening
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageOpenError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    #[error("not a supported image")]
    NotAnImage,
    #[error("{0}")]
    Io(String),
}

impl ImageOpenError {
    /// Get a user-friendly error message
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::NotAnImage => format!("Not an image: {}", filename),
            Self::Io(msg) => format!("Error opening {}: {}", filename, msg),
        }
    }
}

/// Validate a path before handing it to the decoder
pub fn validate_image_path(path: &Path) -> Result<(), ImageOpenError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImageOpenError::NotFound,
        std::io::ErrorKind::PermissionDenied => ImageOpenError::PermissionDenied,
        _ => ImageOpenError::Io(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(ImageOpenError::IsDirectory);
    }
    if !is_image_file(path) {
        return Err(ImageOpenError::NotAnImage);
    }
    Ok(())
}

/// Check if a file path has an image extension
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Image files in the same directory as `path`, sorted by file name.
///
/// `path` itself is included when it is an image.
pub fn sibling_images(path: &Path) -> Vec<PathBuf> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => images_in_dir(dir),
        _ => images_in_dir(Path::new(".")),
    }
}

/// Image files directly inside `dir`, sorted case-insensitively by name.
/// Unreadable directories yield an empty list.
pub fn images_in_dir(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|p| is_image_file(p))
        .collect();
    images.sort_by_key(|p| p.file_name().map(|n| n.to_ascii_lowercase()));
    images
}

/// The image `step` positions away from `current` among its siblings, wrapping
/// at both ends. Returns None when there is nothing else to show.
pub fn neighbor_image(current: &Path, step: isize) -> Option<PathBuf> {
    let images = sibling_images(current);
    if images.is_empty() {
        return None;
    }

    let name = current.file_name();
    let len = images.len() as isize;
    let index = match images.iter().position(|p| p.file_name() == name) {
        Some(i) => i as isize,
        // Current file vanished: step from where it would have been
        None if step > 0 => -1,
        None => len,
    };

    let next = (index + step).rem_euclid(len) as usize;
    let candidate = images.get(next)?;
    (candidate.file_name() != name).then(|| candidate.clone())
}

/// Get the filename from a path for display in titles and messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
