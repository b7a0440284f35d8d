// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Diagnostic pictures: the energy map, and a seam painted over the
//! image it was found in.

use crate::energy::EnergyGrid;
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

/// Scale an energy grid so that its hottest pixel is white.  A grid
/// with no energy at all comes out black.
pub fn energy_to_image(energy: &EnergyGrid) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(width, height, |x, y| {
        let e = energy[(x, y)];
        let c = if factor > 0.0 { e * 255.0 / factor } else { 0.0 };
        Luma([c.round().max(0.0).min(255.0) as u8])
    })
}

/// Paint a seam onto a copy of an image.  Seam entries that fall
/// outside the image are skipped.
pub fn overlay_seam(image: &RgbImage, seam: &[u32], color: [u8; 3]) -> RgbImage {
    let mut out = image.clone();
    let (width, height) = out.dimensions();
    seam.iter()
        .zip(0..height)
        .filter(|(x, _)| **x < width)
        .for_each(|(&x, y)| out.put_pixel(x, y, Rgb(color)));
    out
}
