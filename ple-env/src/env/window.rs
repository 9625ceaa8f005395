//! Viewer window for human rendering.
use anyhow::Result;
use ndarray::Array3;

#[cfg(not(feature = "viewer"))]
use crate::PleEnvError;

#[cfg(feature = "viewer")]
use {
    crate::PleEnvError,
    minifb::{Scale, Window, WindowOptions},
};

/// Window showing image observations, opened on first human rendering.
pub(super) struct ImageViewer {
    #[cfg(feature = "viewer")]
    window: Window,

    // 0RGB pixels
    #[cfg(feature = "viewer")]
    buffer: Vec<u32>,
}

#[cfg(feature = "viewer")]
impl ImageViewer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                scale: Scale::X4,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| PleEnvError::Viewer(e.to_string()))?;

        Ok(Self {
            window,
            buffer: vec![0; width * height],
        })
    }

    pub fn imshow(&mut self, img: &Array3<u8>) -> Result<()> {
        let (h, w, _) = img.dim();
        self.buffer.resize(w * h, 0);
        for (px, rgb) in self
            .buffer
            .iter_mut()
            .zip(img.as_slice().unwrap_or(&[]).chunks_exact(3))
        {
            *px = (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32;
        }
        self.window
            .update_with_buffer(&self.buffer, w, h)
            .map_err(|e| PleEnvError::Viewer(e.to_string()).into())
    }
}

#[cfg(not(feature = "viewer"))]
impl ImageViewer {
    pub fn new(_title: &str, _width: usize, _height: usize) -> Result<Self> {
        Err(PleEnvError::ViewerUnavailable.into())
    }

    pub fn imshow(&mut self, _img: &Array3<u8>) -> Result<()> {
        Ok(())
    }
}
