// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The working image
//!
//! Repeated insertions average neighbouring pixels, so the carver
//! works on a floating-point copy of the decoded image and only rounds
//! back to 8 bits at the very end.  This is also the boundary where
//! malformed input is turned away; nothing past here checks again.

use crate::error::{CarveError, Result};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

/// Three f64 channels per pixel, on the usual 0-255 scale.
pub type CarveImage = ImageBuffer<Rgb<f64>, Vec<f64>>;

/// Decoded image -> working image.  Anything that isn't already RGB is
/// converted first.
pub fn from_dynamic(image: &DynamicImage) -> Result<CarveImage> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(CarveError::MalformedImage(format!(
            "image is {}x{}",
            width, height
        )));
    }
    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let p = rgb.get_pixel(x, y);
        Rgb([f64::from(p[0]), f64::from(p[1]), f64::from(p[2])])
    }))
}

/// Build a working image from interleaved samples.  Fails unless there
/// are exactly three channels, the sample count matches, and both
/// dimensions are non-zero.
pub fn from_samples(width: u32, height: u32, channels: u8, samples: Vec<f64>) -> Result<CarveImage> {
    if channels != 3 {
        return Err(CarveError::MalformedImage(format!(
            "expected 3 channels, got {}",
            channels
        )));
    }
    if width == 0 || height == 0 {
        return Err(CarveError::MalformedImage(format!(
            "image is {}x{}",
            width, height
        )));
    }
    let expected = width as usize * height as usize * 3;
    let actual = samples.len();
    ImageBuffer::from_raw(width, height, samples).ok_or_else(|| {
        CarveError::MalformedImage(format!(
            "expected {} samples for {}x{}, got {}",
            expected, width, height, actual
        ))
    })
}

/// Build a working image from rows of pixels.  Every row must be the
/// same, non-zero, length.
pub fn from_rows(rows: &[Vec<[f64; 3]>]) -> Result<CarveImage> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(CarveError::MalformedImage(format!(
            "row {} has {} pixels, row 0 has {}",
            y,
            row.len(),
            width
        )));
    }
    let samples = rows.iter().flatten().flatten().copied().collect();
    from_samples(width as u32, rows.len() as u32, 3, samples)
}

#[inline]
fn saturate(c: f64) -> u8 {
    // NaN goes to zero, like every other out-of-range sample.
    c.round().max(0.0).min(255.0) as u8
}

/// Working image -> 8-bit RGB, rounding and saturating every sample.
pub fn to_rgb8(image: &CarveImage) -> RgbImage {
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let p = image.get_pixel(x, y);
        Rgb([saturate(p[0]), saturate(p[1]), saturate(p[2])])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_are_malformed() {
        let rows = vec![vec![[0.0; 3]; 3], vec![[0.0; 3]; 2]];
        match from_rows(&rows) {
            Err(CarveError::MalformedImage(msg)) => assert!(msg.contains("row 1")),
            other => panic!("expected a malformed image, got {:?}", other),
        }
    }

    #[test]
    fn empty_images_are_malformed() {
        assert!(from_rows(&[]).is_err());
        assert!(from_rows(&[vec![]]).is_err());
    }

    #[test]
    fn four_channels_are_malformed() {
        assert!(from_samples(1, 1, 4, vec![0.0; 4]).is_err());
        assert!(from_samples(2, 1, 3, vec![0.0; 5]).is_err());
    }

    #[test]
    fn rows_land_where_expected() {
        let image = from_rows(&[
            vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
            vec![[7.0, 8.0, 9.0], [10.0, 11.0, 12.0]],
        ])
        .unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0), &Rgb([4.0, 5.0, 6.0]));
        assert_eq!(image.get_pixel(0, 1), &Rgb([7.0, 8.0, 9.0]));
    }

    #[test]
    fn output_rounds_and_saturates() {
        let image = from_rows(&[vec![[127.5, -3.0, 300.0], [0.49, 254.6, f64::NAN]]]).unwrap();
        let out = to_rgb8(&image);
        assert_eq!(out.get_pixel(0, 0), &Rgb([128, 0, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([0, 255, 0]));
    }

    #[test]
    fn decoded_images_convert() {
        let decoded = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([9, 8, 7])));
        let image = from_dynamic(&decoded).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Rgb([9.0, 8.0, 7.0]));
    }
}
