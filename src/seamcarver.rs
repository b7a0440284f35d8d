// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Removing seams shrinks an image one column at a time, re-running
//! the seam search after every cut.  Inserting seams is done in one
//! batch: the seams that *would* be removed are found first on a
//! scratch copy, then each is duplicated back into the original
//! image, with the seams still waiting adjusted for the columns each
//! insertion adds.

use crate::config::CarveConfig;
use crate::cq;
use crate::dump::{energy_to_image, overlay_seam};
use crate::energy::forward_energy;
use crate::error::{CarveError, Result};
use crate::seamfinder::{find_minimum_seam, RetentionMask, Seam};
use crate::working::{self, CarveImage};
use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, Pixel, Primitive, RgbImage};
use log::{debug, info};
use num_traits::NumCast;
use std::cmp::Ordering;

fn copy_image<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| image.get_pixel(x, y))
}

fn check_mask(mask: &RetentionMask, (width, height): (u32, u32)) -> Result<()> {
    if mask.dimensions() != (width, height) {
        return Err(CarveError::MaskDimensions {
            mask_width: mask.width,
            mask_height: mask.height,
            width,
            height,
        });
    }
    for y in 0..height {
        let removed = (0..width).filter(|&x| !mask[(x, y)]).count();
        if removed != 1 {
            return Err(CarveError::InvalidMask { row: y, removed });
        }
    }
    Ok(())
}

/// Drop the one pixel per row the mask marks `false`, closing up the
/// gap.  The result is one column narrower.
pub fn remove_seam<I, P, S>(image: &I, mask: &RetentionMask) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    check_mask(mask, (width, height))?;

    let mut imgbuf = ImageBuffer::new(width - 1, height);
    for y in 0..height {
        (0..width)
            .filter(|&x| mask[(x, y)])
            .zip(0..)
            .for_each(|(x, target_x)| imgbuf.put_pixel(target_x, y, image.get_pixel(x, y)));
    }
    Ok(imgbuf)
}

fn average<S: Primitive>(a: S, b: S) -> S {
    let (fa, fb): (f64, f64) = (
        NumCast::from(a).unwrap_or(0.0),
        NumCast::from(b).unwrap_or(0.0),
    );
    NumCast::from((fa + fb) / 2.0).unwrap_or(a)
}

/// Insert one synthesised pixel per row at the seam, making the image
/// one column wider.  The new pixel is the average of the seam pixel
/// and its left neighbour, and sits just before the seam pixel; in
/// the first column there is no left neighbour, so the right one is
/// used and the new pixel goes just after.
pub fn add_seam<I, P, S>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            expected: height,
            actual: seam.len(),
        });
    }
    if let Some((y, &column)) = seam.iter().enumerate().find(|(_, x)| **x >= width) {
        return Err(CarveError::SeamOutOfBounds {
            row: y as u32,
            column,
            width,
        });
    }

    let mut imgbuf = ImageBuffer::new(width + 1, height);
    for (y, &col) in (0..height).zip(seam.iter()) {
        // (where the new pixel lands, the pair it's averaged from)
        let (at, (a, b)) = cq!(
            col == 0,
            (1, (0, cq!(width > 1, 1, 0))),
            (col, (col - 1, col))
        );
        let synthesized = image.get_pixel(a, y).map2(&image.get_pixel(b, y), average);
        for x in 0..=width {
            let pixel = match x.cmp(&at) {
                Ordering::Less => image.get_pixel(x, y),
                Ordering::Equal => synthesized,
                Ordering::Greater => image.get_pixel(x - 1, y),
            };
            imgbuf.put_pixel(x, y, pixel);
        }
    }
    Ok(imgbuf)
}

/// Once `committed` has been inserted, every pending seam at or to the
/// right of it (row by row) has moved two columns: one for the pixel
/// that was shifted, one for the pixel that was synthesised.
pub fn correct_pending_seams(pending: &mut [Seam], committed: &[u32]) {
    for seam in pending.iter_mut() {
        seam.iter_mut()
            .zip(committed.iter())
            .filter(|(column, k)| **column >= **k)
            .for_each(|(column, _)| *column += 2);
    }
}

/// The seams found while simulating removal, handed out in the order
/// they were found.  Each seam handed out is assumed committed, and
/// the ones still waiting are corrected for it before the next is
/// handed out.
#[derive(Debug, Clone)]
pub struct PendingSeamBatch {
    // Reversed: the next seam to commit is at the back.
    seams: Vec<Seam>,
}

impl PendingSeamBatch {
    /// Takes seams in the order they were discovered.
    pub fn from_discovery(mut seams: Vec<Seam>) -> Self {
        seams.reverse();
        PendingSeamBatch { seams }
    }

    pub fn len(&self) -> usize {
        self.seams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seams.is_empty()
    }
}

impl Iterator for PendingSeamBatch {
    type Item = Seam;

    fn next(&mut self) -> Option<Seam> {
        let seam = self.seams.pop()?;
        correct_pending_seams(&mut self.seams, &seam);
        Some(seam)
    }
}

/// Repeatedly find and remove the cheapest seam.  Every iteration sees
/// the previous iteration's output.
pub fn remove_seams<I, P, S>(image: &I, count: u32) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut scratch = copy_image(image);
    for n in 0..count {
        let (seam, mask) = find_minimum_seam(&scratch);
        scratch = remove_seam(&scratch, &mask)?;
        debug!(
            "removed seam {} of {} (starting at column {}), width now {}",
            n + 1,
            count,
            seam.first().copied().unwrap_or(0),
            scratch.width()
        );
    }
    Ok(scratch)
}

/// Find `count` seams by removing them from a scratch copy of the
/// image.  Each seam is in the coordinates of the scratch copy as it
/// stood when the seam was found.
pub fn discover_seams<I, P, S>(image: &I, count: u32) -> Result<Vec<Seam>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut scratch = copy_image(image);
    let mut seams = Vec::with_capacity(count as usize);
    for n in 0..count {
        let (seam, mask) = find_minimum_seam(&scratch);
        scratch = remove_seam(&scratch, &mask)?;
        debug!(
            "discovered seam {} of {} (starting at column {})",
            n + 1,
            count,
            seam.first().copied().unwrap_or(0)
        );
        seams.push(seam);
    }
    Ok(seams)
}

/// Widen an image by `count` columns.
pub fn insert_seams<I, P, S>(image: &I, count: u32) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    if count == 0 {
        return Err(CarveError::ZeroSeams);
    }
    if count > width {
        return Err(CarveError::PreconditionViolation {
            width,
            height,
            dx: NumCast::from(count).unwrap_or(i32::MAX),
        });
    }

    let mut widened = copy_image(image);
    for seam in PendingSeamBatch::from_discovery(discover_seams(image, count)?) {
        widened = add_seam(&widened, &seam)?;
        debug!(
            "inserted seam at column {}, width now {}",
            seam.first().copied().unwrap_or(0),
            widened.width()
        );
    }
    Ok(widened)
}

/// Carve `dx` columns out of (negative) or into (positive) an image.
/// The image must have at least one row, the result must have at least
/// one column, and no more than `width` columns can be added at once.
pub fn carve<I, P, S>(image: &I, dx: i32) -> Result<ImageBuffer<P, Vec<S>>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let (w, d) = (<i64 as From<u32>>::from(width), <i64 as From<i32>>::from(dx));
    if height == 0 || w + d <= 0 || d > w {
        return Err(CarveError::PreconditionViolation { width, height, dx });
    }

    info!("carving {}x{} image by {} columns", width, height, dx);
    let carved = match dx.cmp(&0) {
        Ordering::Equal => copy_image(image),
        Ordering::Less => remove_seams(image, dx.unsigned_abs())?,
        Ordering::Greater => insert_seams(image, dx.unsigned_abs())?,
    };
    info!("carved image is {}x{}", carved.width(), carved.height());
    Ok(carved)
}

/// Decoded images in, decoded images out: the carver as a tool sees
/// it, with the downsizing policy and seam colour from a
/// `CarveConfig` applied along the way.
#[derive(Debug, Clone, Default)]
pub struct SeamCarver {
    config: CarveConfig,
}

impl SeamCarver {
    pub fn new(config: CarveConfig) -> Self {
        SeamCarver { config }
    }

    pub fn config(&self) -> &CarveConfig {
        &self.config
    }

    /// Downsize (if configured) and convert to the working
    /// representation.
    pub fn prepare(&self, image: &DynamicImage) -> Result<CarveImage> {
        working::from_dynamic(&self.config.downsize_image(image))
    }

    /// Given an image and a signed column count, carve it.  The
    /// preconditions of `carve` apply to the image after downsizing.
    pub fn carve(&self, image: &DynamicImage, dx: i32) -> Result<RgbImage> {
        let scratch = self.prepare(image)?;
        Ok(working::to_rgb8(&carve(&scratch, dx)?))
    }

    /// Carve `source` by however many columns `estimator` decides it
    /// differs from `reference`.
    pub fn carve_towards<E>(
        &self,
        source: &DynamicImage,
        reference: &DynamicImage,
        estimator: &E,
    ) -> Result<RgbImage>
    where
        E: crate::delta::DeltaEstimator + ?Sized,
    {
        let dx = estimator.estimate(source, reference);
        debug!("estimated a change of {} columns", dx);
        self.carve(source, dx)
    }

    /// The forward energy of the prepared image, as a picture.
    pub fn energy_map(&self, image: &DynamicImage) -> Result<GrayImage> {
        Ok(energy_to_image(&forward_energy(&self.prepare(image)?)))
    }

    /// The prepared image with its cheapest seam painted on it.
    pub fn seam_overlay(&self, image: &DynamicImage) -> Result<RgbImage> {
        let scratch = self.prepare(image)?;
        let (seam, _) = find_minimum_seam(&scratch);
        Ok(overlay_seam(
            &working::to_rgb8(&scratch),
            &seam,
            self.config.seam_color,
        ))
    }
}
