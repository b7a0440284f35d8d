// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving configuration
//!
//! The handful of knobs that sit around the carver: whether (and how
//! far) to shrink large images before carving, and the colour seams
//! are painted in when they're drawn.  A `CarveConfig` is handed to the
//! `SeamCarver` when it's built; nothing here is global.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::debug;

pub const DEFAULT_DOWNSIZE_WIDTH: u32 = 500;
pub const DEFAULT_SEAM_COLOR: [u8; 3] = [200, 200, 255];

#[derive(Debug, Clone, PartialEq)]
pub struct CarveConfig {
    /// Shrink wide images before carving.
    pub downsize: bool,
    /// The width images are shrunk to when `downsize` is on.
    pub downsize_width: u32,
    /// RGB colour for seam overlays.
    pub seam_color: [u8; 3],
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig {
            downsize: true,
            downsize_width: DEFAULT_DOWNSIZE_WIDTH,
            seam_color: DEFAULT_SEAM_COLOR,
        }
    }
}

impl CarveConfig {
    pub fn without_downsize(mut self) -> Self {
        self.downsize = false;
        self
    }

    pub fn with_downsize_width(mut self, width: u32) -> Self {
        self.downsize = true;
        self.downsize_width = width;
        self
    }

    pub fn with_seam_color(mut self, color: [u8; 3]) -> Self {
        self.seam_color = color;
        self
    }

    /// The (width, height) an image of the given size is shrunk to,
    /// or `None` if it's left alone.  Aspect ratio is kept; the height
    /// is truncated but never reaches zero.
    pub fn downsized_dimensions(&self, (width, height): (u32, u32)) -> Option<(u32, u32)> {
        if !self.downsize || self.downsize_width == 0 || width <= self.downsize_width {
            return None;
        }
        let scaled = u64::from(height) * u64::from(self.downsize_width) / u64::from(width);
        Some((self.downsize_width, (scaled as u32).max(1)))
    }

    /// Apply the downsizing policy to a decoded image.
    pub fn downsize_image(&self, image: &DynamicImage) -> DynamicImage {
        match self.downsized_dimensions(image.dimensions()) {
            Some((width, height)) => {
                debug!(
                    "downsizing {:?} to {}x{}",
                    image.dimensions(),
                    width,
                    height
                );
                image.resize_exact(width, height, FilterType::Triangle)
            }
            None => image.clone(),
        }
    }
}

/// Parse an `R,G,B` triple, each component 0-255.
pub fn parse_color(s: &str) -> Option<[u8; 3]> {
    let parts = s
        .split(',')
        .map(|c| c.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match parts.as_slice() {
        [r, g, b] => Some([*r, *g, *b]),
        _ => None,
    }
}
