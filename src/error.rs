//! Error types for image loading and drawing
//!
//! No error here is fatal to the host: load errors leave one representation
//! missing, draw errors skip a layer or stop the animation.

use std::path::PathBuf;

/// Failure to produce one representation of an image
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("unsupported image format: {0}")]
    Unsupported(PathBuf),

    #[error("image has no frames: {0}")]
    Empty(PathBuf),

    #[error("{width}x{height} exceeds the {limit}px texture limit")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("out of memory allocating {0} pixels")]
    OutOfMemory(usize),
}

/// Failure while drawing one layer of a repaint
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    /// Degenerate rectangles, NaN coordinates, mismatched buffers
    #[error("invalid draw argument: {0}")]
    InvalidArgument(String),

    #[error("out of memory while drawing")]
    OutOfMemory,

    /// The bitmap was released while a frame was being fetched
    #[error("bitmap was released during draw")]
    Disposed,

    /// The rendering backend itself failed
    #[error("backend failure: {0}")]
    Backend(String),
}

/// How the render pipeline reacts to a [`DrawError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawErrorClass {
    /// Skip this layer for this repaint, keep all state
    Transient,
    /// Stop animation and reset to frame zero; static draws continue
    StopAnimation,
}

impl DrawError {
    pub fn class(&self) -> DrawErrorClass {
        match self {
            DrawError::InvalidArgument(_) | DrawError::OutOfMemory => DrawErrorClass::Transient,
            DrawError::Disposed | DrawError::Backend(_) => DrawErrorClass::StopAnimation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_error_classes() {
        assert_eq!(
            DrawError::InvalidArgument("x".into()).class(),
            DrawErrorClass::Transient
        );
        assert_eq!(DrawError::OutOfMemory.class(), DrawErrorClass::Transient);
        assert_eq!(DrawError::Disposed.class(), DrawErrorClass::StopAnimation);
        assert_eq!(
            DrawError::Backend("lost".into()).class(),
            DrawErrorClass::StopAnimation
        );
    }

    #[test]
    fn test_too_large_message() {
        let err = LoadError::TooLarge {
            width: 20000,
            height: 10,
            limit: 16384,
        };
        assert_eq!(err.to_string(), "20000x10 exceeds the 16384px texture limit");
    }
}
