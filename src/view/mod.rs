//! View module - presents rendered frames to the window
//!
//! Contains the Renderer struct that owns the softbuffer surface, the back
//! buffer the pipeline draws into, and the drawing backends.

pub mod frame;
pub mod icons;
pub mod pipeline;
pub mod text;

pub use frame::Frame;
pub use pipeline::{render, CheckerboardMode, RenderReport};

use anyhow::Result;
use softbuffer::Surface;
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::Window;

use crate::backend::Backends;
use crate::config::ViewerConfig;
use crate::model::ViewerModel;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so the pipeline draws here and the result is copied on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    backends: Backends,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        config: &ViewerConfig,
    ) -> Result<Self> {
        let size = window.inner_size();
        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            surface
                .resize(w, h)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        let font = text::load_font(config.text.font_path.as_deref());
        if font.is_none() {
            tracing::warn!("No usable font found, on-canvas messages will not be drawn");
        }

        Ok(Self {
            surface,
            back_buffer: vec![0u32; size.width as usize * size.height as usize],
            width: size.width,
            height: size.height,
            backends: Backends::new(font, config.max_texture_size),
        })
    }

    /// Draw the model and present it. Returns None when the window has no area.
    pub fn render(&mut self, model: &mut ViewerModel) -> Result<Option<RenderReport>> {
        let client = model.client_size();
        let width = client.width.max(0.0) as u32;
        let height = client.height.max(0.0) as u32;
        let (Some(nz_width), Some(nz_height)) = (NonZeroU32::new(width), NonZeroU32::new(height))
        else {
            return Ok(None);
        };

        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.back_buffer.resize(width as usize * height as usize, 0);
            self.surface
                .resize(nz_width, nz_height)
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        let report = {
            let mut frame = Frame::new(&mut self.back_buffer, width as usize, height as usize);
            pipeline::render(model, &mut frame, &mut self.backends)
        };

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        let len = buffer.len().min(self.back_buffer.len());
        buffer[..len].copy_from_slice(&self.back_buffer[..len]);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(Some(report))
    }
}
