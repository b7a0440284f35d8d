// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! How many columns to carve
//!
//! The carver only ever needs a signed column count.  Where that count
//! comes from (a flag, a comparison between two photographs) is
//! somebody else's business, so it's injected as a `DeltaEstimator`.

use image::DynamicImage;

/// Something that looks at a source image and a reference image and
/// decides how many columns to add (positive) or remove (negative)
/// from the source.
pub trait DeltaEstimator {
    fn estimate(&self, source: &DynamicImage, reference: &DynamicImage) -> i32;
}

impl<F> DeltaEstimator for F
where
    F: Fn(&DynamicImage, &DynamicImage) -> i32,
{
    fn estimate(&self, source: &DynamicImage, reference: &DynamicImage) -> i32 {
        self(source, reference)
    }
}

/// Carve the source until it's as wide as the reference.
#[derive(Debug, Default, Copy, Clone)]
pub struct WidthDifference;

impl DeltaEstimator for WidthDifference {
    fn estimate(&self, source: &DynamicImage, reference: &DynamicImage) -> i32 {
        let delta = i64::from(reference.width()) - i64::from(source.width());
        delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }
}
