//! Image loading
//!
//! A loaded image carries up to two representations: a [`CpuBitmap`] used
//! for animation and software rendering, and a [`NativeBitmap`] used by the
//! accelerated backend. The two are decoded independently so a failure in
//! one never prevents the other.

pub mod bitmap;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, ImageError, ImageFormat, ImageReader};

pub use bitmap::{BitmapFrame, CpuBitmap, NativeBitmap};

use crate::error::LoadError;

/// The currently displayed image
#[derive(Debug, Default)]
pub struct LoadedImage {
    /// Source file, if the image came from disk
    pub path: Option<PathBuf>,
    pub cpu: Option<CpuBitmap>,
    pub native: Option<NativeBitmap>,
}

impl LoadedImage {
    /// Build from in-memory representations (used by hosts that decode themselves)
    pub fn from_parts(cpu: Option<CpuBitmap>, native: Option<NativeBitmap>) -> Self {
        Self {
            path: None,
            cpu,
            native,
        }
    }

    /// Pixel width, from whichever representation is present
    pub fn width(&self) -> u32 {
        self.cpu
            .as_ref()
            .map(|c| c.width())
            .or_else(|| self.native.as_ref().map(|n| n.width()))
            .unwrap_or(0)
    }

    /// Pixel height, from whichever representation is present
    pub fn height(&self) -> u32 {
        self.cpu
            .as_ref()
            .map(|c| c.height())
            .or_else(|| self.native.as_ref().map(|n| n.height()))
            .unwrap_or(0)
    }

    pub fn frame_count(&self) -> usize {
        match (&self.cpu, &self.native) {
            (Some(cpu), _) => cpu.frame_count(),
            (None, Some(_)) => 1,
            (None, None) => 0,
        }
    }

    pub fn has_alpha(&self) -> bool {
        match (&self.cpu, &self.native) {
            (Some(cpu), _) => cpu.has_alpha(),
            (None, Some(native)) => !native.is_opaque(),
            (None, None) => false,
        }
    }

    /// True if neither representation is available
    pub fn is_empty(&self) -> bool {
        self.cpu.is_none() && self.native.is_none()
    }

    /// Release both representations together
    pub fn release(&mut self) {
        self.cpu = None;
        self.native = None;
    }
}

/// Load both representations of an image file.
///
/// Each representation is decoded independently; the result is an error only
/// if both fail, in which case the CPU decode error is returned.
pub fn load_image(path: &Path, max_texture_size: u32) -> Result<LoadedImage, LoadError> {
    let cpu = decode_cpu(path);
    let native = decode_native(path, max_texture_size);

    let (cpu, native) = match (cpu, native) {
        (Err(cpu_err), Err(native_err)) => {
            tracing::warn!(
                "Both decodes failed for {}: cpu: {}, native: {}",
                path.display(),
                cpu_err,
                native_err
            );
            return Err(cpu_err);
        }
        (cpu, native) => (
            cpu.inspect_err(|e| tracing::warn!("CPU bitmap unavailable: {}", e))
                .ok(),
            native
                .inspect_err(|e| tracing::warn!("Native bitmap unavailable: {}", e))
                .ok(),
        ),
    };

    let image = LoadedImage {
        path: Some(path.to_path_buf()),
        cpu,
        native,
    };

    tracing::info!(
        "Loaded {} ({}x{}, {} frame(s), cpu: {}, native: {})",
        path.display(),
        image.width(),
        image.height(),
        image.frame_count(),
        image.cpu.is_some(),
        image.native.is_some()
    );

    Ok(image)
}

fn map_image_error(path: &Path, err: ImageError) -> LoadError {
    match err {
        ImageError::IoError(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        ImageError::Unsupported(_) => LoadError::Unsupported(path.to_path_buf()),
        other => LoadError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}

fn open_reader(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Decode the CPU representation, keeping every animation frame
pub fn decode_cpu(path: &Path) -> Result<CpuBitmap, LoadError> {
    let format = ImageReader::open(path)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .format();

    let frames = match format {
        Some(ImageFormat::Gif) => {
            let decoder =
                GifDecoder::new(open_reader(path)?).map_err(|e| map_image_error(path, e))?;
            Some(collect_frames(path, decoder)?)
        }
        Some(ImageFormat::WebP) => {
            let decoder =
                WebPDecoder::new(open_reader(path)?).map_err(|e| map_image_error(path, e))?;
            if decoder.has_animation() {
                Some(collect_frames(path, decoder)?)
            } else {
                None
            }
        }
        Some(ImageFormat::Png) => {
            let decoder =
                PngDecoder::new(open_reader(path)?).map_err(|e| map_image_error(path, e))?;
            if decoder.is_apng().map_err(|e| map_image_error(path, e))? {
                let apng = decoder.apng().map_err(|e| map_image_error(path, e))?;
                Some(collect_frames(path, apng)?)
            } else {
                None
            }
        }
        Some(_) => None,
        None => return Err(LoadError::Unsupported(path.to_path_buf())),
    };

    if let Some((width, height, frames)) = frames {
        return Ok(CpuBitmap::from_frames(width, height, frames));
    }

    let rgba = image::open(path)
        .map_err(|e| map_image_error(path, e))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(CpuBitmap::from_rgba(width, height, rgba.into_raw()))
}

/// Decode all frames of an animation onto a common canvas
fn collect_frames<'a, D: AnimationDecoder<'a>>(
    path: &Path,
    decoder: D,
) -> Result<(u32, u32, Vec<BitmapFrame>), LoadError> {
    let decoded = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| map_image_error(path, e))?;

    let first = decoded
        .first()
        .ok_or_else(|| LoadError::Empty(path.to_path_buf()))?;
    let (width, height) = (
        first.buffer().width() + first.left(),
        first.buffer().height() + first.top(),
    );

    let frames = decoded
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = Duration::from_millis((numer as u64) / (denom.max(1) as u64));
            let (left, top) = (frame.left(), frame.top());
            let buffer = frame.into_buffer();
            let pixels = if left == 0 && top == 0 && buffer.dimensions() == (width, height) {
                buffer.into_raw()
            } else {
                place_on_canvas(&buffer, left, top, width, height)
            };
            BitmapFrame { pixels, delay }
        })
        .collect();

    Ok((width, height, frames))
}

/// Copy a sub-frame onto a transparent canvas at (left, top)
fn place_on_canvas(frame: &image::RgbaImage, left: u32, top: u32, width: u32, height: u32) -> Vec<u8> {
    let mut canvas = vec![0u8; width as usize * height as usize * 4];
    for (x, y, px) in frame.enumerate_pixels() {
        let cx = x + left;
        let cy = y + top;
        if cx < width && cy < height {
            let idx = (cy as usize * width as usize + cx as usize) * 4;
            canvas[idx..idx + 4].copy_from_slice(&px.0);
        }
    }
    canvas
}

/// Decode the backend-native representation (first frame only)
pub fn decode_native(path: &Path, max_texture_size: u32) -> Result<NativeBitmap, LoadError> {
    let rgba = image::open(path)
        .map_err(|e| map_image_error(path, e))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    NativeBitmap::from_rgba(width, height, rgba.as_raw(), max_texture_size)
}
