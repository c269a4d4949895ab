//! Lumen - Elm-style image viewer core
//!
//! This crate provides the viewport transform, the layered render pipeline,
//! the drawing backends and the model/update logic of an image viewer
//! implementing the Elm Architecture pattern. The `lumen` binary adds the
//! winit runtime around it.

pub mod animation;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod events;
pub mod geometry;
pub mod image;
pub mod messages;
pub mod model;
pub mod nav;
pub mod overlay;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;
pub mod viewport;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ViewerConfig;
pub use events::ViewerEvent;
pub use messages::ViewerMsg;
pub use model::ViewerModel;
pub use theme::ViewerTheme;
pub use update::update;
