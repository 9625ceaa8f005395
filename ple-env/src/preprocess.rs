//! Conversion of screen captures into image observations.
use image::{
    imageops::{flip_horizontal, rotate90},
    RgbImage,
};
use ndarray::Array3;

/// Height and width of image observations.
pub const IMAGE_SIZE: usize = 64;

/// Shape of image observations, `(height, width, channel)`.
pub const IMAGE_SHAPE: [usize; 3] = [IMAGE_SIZE, IMAGE_SIZE, 3];

/// Turns a capture of the engine into an image observation.
///
/// Captures come transposed, see [`Surface::capture`](crate::engine::Surface::capture).
/// The capture is rotated by three quarter-turns counter-clockwise, mirrored
/// left to right and then downscaled to [`IMAGE_SHAPE`] by area averaging.
/// The order of these steps matters.
pub fn screen_to_image(capture: &RgbImage) -> Array3<u8> {
    let img = flip_horizontal(&rotate90(capture));
    let img = resize_area(&img, IMAGE_SIZE as u32, IMAGE_SIZE as u32);
    let (w, h) = img.dimensions();
    Array3::from_shape_vec((h as usize, w as usize, 3), img.into_raw())
        .expect("buffer length is w * h * 3")
}

// Source pixels covered by each destination pixel along one axis,
// as (source index, coverage) pairs.
fn area_weights(src: u32, dst: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|d| {
            let (lo, hi) = (d as f64 * scale, (d + 1) as f64 * scale);
            let first = lo.floor() as usize;
            let last = (hi.ceil() as usize).min(src as usize);
            (first..last)
                .map(|s| {
                    let cover = (hi.min(s as f64 + 1.0) - lo.max(s as f64)) / scale;
                    (s, cover)
                })
                .filter(|(_, cover)| *cover > 0.0)
                .collect()
        })
        .collect()
}

/// Resizes an image, each destination pixel being the area-weighted average of
/// the source pixels it covers.
pub fn resize_area(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    let (src_w, src_h) = img.dimensions();
    if (src_w, src_h) == (width, height) {
        return img.clone();
    }

    let wx = area_weights(src_w, width);
    let wy = area_weights(src_h, height);

    RgbImage::from_fn(width, height, |x, y| {
        let mut acc = [0f64; 3];
        for &(sy, cy) in wy[y as usize].iter() {
            for &(sx, cx) in wx[x as usize].iter() {
                let px = img.get_pixel(sx as u32, sy as u32);
                for c in 0..3 {
                    acc[c] += px[c] as f64 * cx * cy;
                }
            }
        }
        image::Rgb(acc.map(|v| v.round().clamp(0.0, 255.0) as u8))
    })
}
