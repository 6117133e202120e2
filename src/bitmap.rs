use egui::{Color32, ColorImage};

use crate::command::PixelPos;
use crate::error::ExportError;

/// Width over height of every canvas
pub const ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Computes the bitmap size that fits `height` at a 16:9 aspect
pub fn fitting_size_16_by_9(height: f32) -> [usize; 2] {
    let height = height.max(0.0);
    let width = height * ASPECT_RATIO;
    [width as usize, height as usize]
}

/// RGBA pixel grid backing a canvas.
///
/// Pixel access is bounds-checked: reads outside the grid return `None` and
/// writes outside it are dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    image: ColorImage,
}

impl Bitmap {
    pub fn new(size: [usize; 2], color: Color32) -> Self {
        Self {
            image: ColorImage::new(size, color),
        }
    }

    pub fn width(&self) -> usize {
        self.image.size[0]
    }

    pub fn height(&self) -> usize {
        self.image.size[1]
    }

    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    pub fn contains(&self, pos: PixelPos) -> bool {
        self.index_of(pos).is_some()
    }

    pub fn get(&self, pos: PixelPos) -> Option<Color32> {
        self.index_of(pos).map(|i| self.image.pixels[i])
    }

    /// Writes one pixel. Returns false when `pos` is outside the grid.
    pub fn set(&mut self, pos: PixelPos, color: Color32) -> bool {
        match self.index_of(pos) {
            Some(i) => {
                self.image.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: Color32) {
        self.image.pixels.fill(color);
    }

    pub fn pixels(&self) -> &[Color32] {
        &self.image.pixels
    }

    /// Number of pixels equal to `color`
    pub fn count(&self, color: Color32) -> usize {
        self.image.pixels.iter().filter(|p| **p == color).count()
    }

    pub fn as_color_image(&self) -> &ColorImage {
        &self.image
    }

    /// Converts to an `image` buffer with unmultiplied alpha
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage, ExportError> {
        let raw: Vec<u8> = self
            .image
            .pixels
            .iter()
            .flat_map(|p| p.to_srgba_unmultiplied())
            .collect();
        image::RgbaImage::from_raw(self.width() as u32, self.height() as u32, raw)
            .ok_or(ExportError::BufferMismatch)
    }

    fn index_of(&self, pos: PixelPos) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(y * self.width() + x)
    }
}
