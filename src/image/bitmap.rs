//! Bitmap representations of a loaded image
//!
//! [`CpuBitmap`] keeps straight-alpha RGBA frames and knows how to step
//! through an animation. [`NativeBitmap`] holds a single frame already
//! converted to the surface's ARGB `u32` layout for the fast backend.

use std::time::Duration;

use crate::error::{DrawError, LoadError};

/// Browsers clamp very short GIF delays; so do we
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);
/// Delay used when a frame declares none
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Normalize a decoded frame delay
pub fn normalize_delay(delay: Duration) -> Duration {
    if delay.is_zero() {
        DEFAULT_FRAME_DELAY
    } else {
        delay.max(MIN_FRAME_DELAY)
    }
}

/// One full-canvas frame of RGBA pixels
#[derive(Debug, Clone)]
pub struct BitmapFrame {
    /// RGBA8, row-major, `width * height * 4` bytes
    pub pixels: Vec<u8>,
    /// How long this frame stays on screen
    pub delay: Duration,
}

/// Decode-capable CPU bitmap, possibly multi-frame
#[derive(Debug, Clone)]
pub struct CpuBitmap {
    width: u32,
    height: u32,
    frames: Vec<BitmapFrame>,
    current: usize,
    has_alpha: bool,
}

impl CpuBitmap {
    /// Single-frame bitmap from RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::from_frames(
            width,
            height,
            vec![BitmapFrame {
                pixels,
                delay: Duration::ZERO,
            }],
        )
    }

    /// Multi-frame bitmap; every frame must cover the full canvas
    pub fn from_frames(width: u32, height: u32, frames: Vec<BitmapFrame>) -> Self {
        let has_alpha = frames
            .iter()
            .any(|f| f.pixels.chunks_exact(4).any(|p| p[3] < 255));
        Self {
            width,
            height,
            frames,
            current: 0,
            has_alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn current_frame_index(&self) -> usize {
        self.current
    }

    /// Whether the pixel storage has been dropped by [`CpuBitmap::release`]
    pub fn is_released(&self) -> bool {
        self.frames.is_empty()
    }

    /// Pixels of the frame currently selected
    pub fn current_pixels(&self) -> Result<&[u8], DrawError> {
        let frame = self.frames.get(self.current).ok_or(DrawError::Disposed)?;
        let expected = self.width as usize * self.height as usize * 4;
        if frame.pixels.len() < expected {
            return Err(DrawError::Disposed);
        }
        Ok(&frame.pixels[..expected])
    }

    /// Delay of the frame currently selected
    pub fn current_delay(&self) -> Duration {
        self.frames
            .get(self.current)
            .map(|f| normalize_delay(f.delay))
            .unwrap_or(DEFAULT_FRAME_DELAY)
    }

    /// Step to the next frame, wrapping at the end. Returns the new frame's delay.
    pub fn advance_frame(&mut self) -> Result<Duration, DrawError> {
        if self.frames.is_empty() {
            return Err(DrawError::Disposed);
        }
        self.current = (self.current + 1) % self.frames.len();
        Ok(self.current_delay())
    }

    /// Select a frame by index; out-of-range indices are rejected
    pub fn select_frame(&mut self, index: usize) -> Result<(), DrawError> {
        if index >= self.frames.len() {
            return Err(DrawError::InvalidArgument(format!(
                "frame {} of {}",
                index,
                self.frames.len()
            )));
        }
        self.current = index;
        Ok(())
    }

    /// Drop pixel storage. Size metadata survives so late readers get
    /// [`DrawError::Disposed`] instead of a panic.
    pub fn release(&mut self) {
        self.frames = Vec::new();
        self.current = 0;
    }
}

/// Backend-native bitmap: one frame in surface ARGB format
#[derive(Debug, Clone)]
pub struct NativeBitmap {
    width: u32,
    height: u32,
    /// ARGB u32, straight alpha, row-major
    pixels: Vec<u32>,
    opaque: bool,
}

impl NativeBitmap {
    /// Convert RGBA8 pixels into surface format, enforcing a texture size limit
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
        max_texture_size: u32,
    ) -> Result<Self, LoadError> {
        if width > max_texture_size || height > max_texture_size {
            return Err(LoadError::TooLarge {
                width,
                height,
                limit: max_texture_size,
            });
        }

        let count = width as usize * height as usize;
        let mut pixels: Vec<u32> = Vec::new();
        pixels
            .try_reserve_exact(count)
            .map_err(|_| LoadError::OutOfMemory(count))?;

        let mut opaque = true;
        for px in rgba.chunks_exact(4).take(count) {
            let [r, g, b, a] = [px[0] as u32, px[1] as u32, px[2] as u32, px[3] as u32];
            opaque &= a == 255;
            pixels.push((a << 24) | (r << 16) | (g << 8) | b);
        }
        // Short input: pad with transparent pixels rather than read past the end
        if pixels.len() < count {
            opaque = false;
            pixels.resize(count, 0);
        }

        Ok(Self {
            width,
            height,
            pixels,
            opaque,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// True if no pixel has alpha below 255
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<BitmapFrame> {
        (0..n)
            .map(|i| BitmapFrame {
                pixels: vec![i as u8, 0, 0, 255, i as u8, 0, 0, 255],
                delay: Duration::from_millis(50),
            })
            .collect()
    }

    #[test]
    fn test_advance_frame_wraps() {
        let mut bmp = CpuBitmap::from_frames(2, 1, frames(3));
        assert_eq!(bmp.current_frame_index(), 0);
        bmp.advance_frame().unwrap();
        bmp.advance_frame().unwrap();
        assert_eq!(bmp.current_frame_index(), 2);
        bmp.advance_frame().unwrap();
        assert_eq!(bmp.current_frame_index(), 0);
    }

    #[test]
    fn test_released_bitmap_reports_disposed() {
        let mut bmp = CpuBitmap::from_frames(2, 1, frames(2));
        bmp.release();
        assert!(bmp.is_released());
        assert_eq!(bmp.width(), 2);
        assert_eq!(bmp.current_pixels().unwrap_err(), DrawError::Disposed);
        assert_eq!(bmp.advance_frame().unwrap_err(), DrawError::Disposed);
    }

    #[test]
    fn test_has_alpha_detection() {
        let opaque = CpuBitmap::from_rgba(1, 1, vec![1, 2, 3, 255]);
        assert!(!opaque.has_alpha());
        let translucent = CpuBitmap::from_rgba(1, 1, vec![1, 2, 3, 128]);
        assert!(translucent.has_alpha());
    }

    #[test]
    fn test_delay_normalization() {
        assert_eq!(normalize_delay(Duration::ZERO), DEFAULT_FRAME_DELAY);
        assert_eq!(normalize_delay(Duration::from_millis(5)), MIN_FRAME_DELAY);
        assert_eq!(
            normalize_delay(Duration::from_millis(70)),
            Duration::from_millis(70)
        );
    }

    #[test]
    fn test_native_bitmap_converts_to_argb() {
        let native = NativeBitmap::from_rgba(1, 1, &[0x11, 0x22, 0x33, 0xFF], 64).unwrap();
        assert_eq!(native.pixels(), &[0xFF112233]);
        assert!(native.is_opaque());
    }

    #[test]
    fn test_native_bitmap_texture_limit() {
        let err = NativeBitmap::from_rgba(65, 1, &[0; 65 * 4], 64).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { limit: 64, .. }));
    }
}
