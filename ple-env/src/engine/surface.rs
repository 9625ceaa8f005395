//! Off-screen drawing surface.
use image::RgbImage;

/// RGB color.
pub type Color = [u8; 3];

/// An off-screen RGB surface games draw on.
///
/// Pixels are stored column by column, `(x, y)` at `(x * height + y) * 3`,
/// which is also the layout of [`Surface::capture`].
#[derive(Clone, Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Surface {
    /// Creates a black surface.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fills the whole surface.
    pub fn fill(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
    }

    /// Fills a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = x.saturating_add(w).clamp(0, self.width as i64) as usize;
        let y1 = y.saturating_add(h).clamp(0, self.height as i64) as usize;

        for xi in x0..x1 {
            for yi in y0..y1 {
                let i = (xi * self.height + yi) * 3;
                self.pixels[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    /// Color of the pixel at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Color {
        let i = (x * self.height + y) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Captures the surface in its native, column-major orientation.
    ///
    /// Rows of the returned image are the columns of the surface, i.e., the image
    /// is `height` pixels wide and `width` pixels high and shows the frame transposed.
    pub fn capture(&self) -> RgbImage {
        RgbImage::from_raw(self.height as u32, self.width as u32, self.pixels.clone())
            .expect("buffer length is width * height * 3")
    }
}
