//! # Render: Software Drawing Surface
//!
//! Draw systems render onto anything implementing [`Surface`]. The crate ships
//! one implementation, [`Canvas`], an RGBA pixel buffer backed by
//! [`image::RgbaImage`]. A windowed backend would implement the same trait
//! over its own framebuffer.
//!
//! Images are shared through [`TextureHandle`], a cheap reference-counted
//! handle. The application creates its textures once during assembly and
//! clones handles into the components and systems that draw them.
//!
//! ## Coordinates
//!
//! Pixel coordinates, origin at the top-left, y pointing down. Draws that
//! hang over an edge are clipped; draws entirely outside are dropped.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use image::{Rgba, RgbaImage, imageops};

use crate::error::FrameError;

/// An RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }
}

impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

/// Shared, immutable image.
#[derive(Clone)]
pub struct TextureHandle(Rc<RgbaImage>);

impl TextureHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Rc::new(image))
    }

    /// A `width`×`height` texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(color.0)))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }

    /// Returns `true` if both handles point at the same image.
    pub fn same(&self, other: &TextureHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextureHandle({}x{})", self.width(), self.height())
    }
}

/// Something draw systems can render onto.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Blend `texture` with its top-left corner at `(x, y)`.
    fn draw_texture(&mut self, texture: &TextureHandle, x: i32, y: i32);
}

/// CPU-side [`Surface`] backed by an RGBA image.
pub struct Canvas {
    image: RgbaImage,
    draws: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            draws: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color(p.0))
    }

    /// Number of `draw_texture` calls since the last `clear`.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Write the current contents as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), FrameError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(FrameError::from)
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Color) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba(color.0);
        }
        self.draws = 0;
    }

    fn draw_texture(&mut self, texture: &TextureHandle, x: i32, y: i32) {
        self.draws += 1;
        imageops::overlay(&mut self.image, texture.image(), x as i64, y as i64);
    }
}
