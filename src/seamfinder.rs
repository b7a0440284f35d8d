// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest vertical seam
//!
//! A second, independent dynamic program runs over the forward-energy
//! grid.  Unlike the energy pass, this one clamps at the row edges:
//! column 0 only considers columns 0 and 1 of the row above.

use crate::edges::clamped_neighbors;
use crate::energy::{forward_energy, EnergyGrid};
use crate::twodmap::{EnergyAndBackPointer, TwoDimensionalMap};
use image::{GenericImageView, Pixel, Primitive};
use log::trace;

/// One column index per row, top to bottom.
pub type Seam = Vec<u32>;

/// `false` marks the single pixel per row a seam removes.
pub type RetentionMask = TwoDimensionalMap<bool>;

type BacktrackGrid = TwoDimensionalMap<EnergyAndBackPointer<f64>>;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// finders, as well as caching.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request the cheapest vertical seam and the
    /// mask that removes it.
    fn vertical_seam(&self) -> (Seam, RetentionMask);
}

// Lowest column wins ties.
fn cheapest_column<I>(columns: I, cost: impl Fn(u32) -> f64) -> Option<u32>
where
    I: Iterator<Item = u32>,
{
    columns.min_by(|a, b| cost(*a).total_cmp(&cost(*b)))
}

/// Given an energy grid, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed, along with the matching retention
/// mask.
pub fn energy_to_vertical_seam(energy: &EnergyGrid) -> (Seam, RetentionMask) {
    let (width, height) = energy.dimensions();
    let mut target = BacktrackGrid::new(width, height);

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)].energy = energy[(x, 0)];
    }

    // For every subsequent row, populate the target cell with the sum
    // of the *lowest adjacent upper energy* and the *x coordinate of
    // that energy*
    for y in 1..height {
        for x in 0..width {
            let parent_x = cheapest_column(clamped_neighbors(x, width), |px| {
                target[(px, y - 1)].energy
            })
            .unwrap_or(x);
            let parent = target[(parent_x, y - 1)];
            target[(x, y)] = EnergyAndBackPointer {
                energy: energy[(x, y)] + parent.energy,
                parent: parent_x,
            };
        }
    }

    let mut mask = RetentionMask::filled(width, height, true);
    if width == 0 || height == 0 {
        return (Seam::new(), mask);
    }

    // Find the x coordinate of the bottommost seam with the least energy.
    let mut seam_col =
        cheapest_column(0..width, |x| target[(x, height - 1)].energy).unwrap_or(0);
    trace!(
        "cheapest seam ends at column {} with cost {}",
        seam_col,
        target[(seam_col, height - 1)].energy
    );

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, marking the mask as we go; reverse and return.
    let seam = (0..height)
        .rev()
        .fold(Seam::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            mask[(seam_col, y)] = false;
            seam_col = target[(seam_col, y)].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect();
    (seam, mask)
}

/// The forward-energy seam engine: just a simple image reference
/// holder.  Nothing is cached; every request recomputes the energy
/// grid from the image as it stands.
pub struct ForwardEnergySeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// A reference to the image we'll be searching.
    pub image: &'a I,
}

impl<'a, I, P, S> ForwardEnergySeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a I) -> Self {
        ForwardEnergySeams { image }
    }
}

impl<'a, I, P, S> SeamFinder for ForwardEnergySeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn vertical_seam(&self) -> (Seam, RetentionMask) {
        energy_to_vertical_seam(&forward_energy(self.image))
    }
}

/// A convenience wrapper: Given an image, get back the next
/// top-to-bottom seam for that image and the mask that removes it.
/// The image is not modified.
pub fn find_minimum_seam<I, P, S>(image: &I) -> (Seam, RetentionMask)
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    ForwardEnergySeams::new(image).vertical_seam()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb};

    const IMAGE_DATA: [u8; 16] = [
        10, 40, 40, 10, //
        10, 40, 80, 10, //
        20, 90, 30, 10, //
        50, 50, 10, 10,
    ];
    const ENERGY_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, //
        9.0, 1.0, 9.0, 8.0, 9.0, //
        9.0, 9.0, 9.0, 9.0, 0.0, //
        9.0, 9.0, 9.0, 0.0, 9.0,
    ];

    fn assert_mask_matches(mask: &RetentionMask, seam: &[u32]) {
        for (y, row) in mask.rows().enumerate() {
            let removed: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|(_, keep)| !**keep)
                .map(|(x, _)| x)
                .collect();
            assert_eq!(removed, vec![seam[y] as usize]);
        }
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energies = EnergyGrid::from_raw(5, 4, ENERGY_DATA.to_vec()).unwrap();
        let (seam, mask) = energy_to_vertical_seam(&energies);
        assert_eq!(seam, vec![2, 3, 4, 3]);
        assert_mask_matches(&mask, &seam);
    }

    #[test]
    fn seam_search_clamps_and_breaks_ties_low() {
        // Every column costs the same: the seam must hug column 0.
        let energies = EnergyGrid::filled(3, 4, 1.0);
        let (seam, _) = energy_to_vertical_seam(&energies);
        assert_eq!(seam, vec![0, 0, 0, 0]);
    }

    #[test]
    fn hand_computed_four_by_four() {
        // Cumulative costs, worked by hand from the forward-energy grid:
        //    0   0   0   0
        //   30  70  30  70
        //  110  50 110  50
        //  100  90 110  90
        // Columns 1 and 3 tie at the bottom; 1 wins.  Row 2 column 1
        // ties between parents 0 and 2; 0 wins.
        let buf: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_raw(4, 4, &IMAGE_DATA[..]).unwrap();
        let (seam, mask) = find_minimum_seam(&buf);
        assert_eq!(seam, vec![0, 0, 1, 1]);
        let expected_mask = [
            false, true, true, true, //
            false, true, true, true, //
            true, false, true, true, //
            true, false, true, true,
        ];
        assert_eq!(mask.as_slice(), &expected_mask[..]);
    }

    #[test]
    fn single_column_seam() {
        let buf: ImageBuffer<Rgb<f64>, Vec<f64>> =
            ImageBuffer::from_fn(1, 5, |_, y| Rgb([y as f64 * 10.0, 0.0, 0.0]));
        let (seam, mask) = find_minimum_seam(&buf);
        assert_eq!(seam, vec![0; 5]);
        assert!(mask.as_slice().iter().all(|keep| !keep));
    }

    #[test]
    fn single_row_picks_cheapest_column() {
        // Row 0 carries no forward energy, so the first column wins.
        let buf: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(4, 1, vec![200, 0, 90, 4]).unwrap();
        let (seam, mask) = find_minimum_seam(&buf);
        assert_eq!(seam, vec![0]);
        assert_eq!(mask.as_slice(), &[false, true, true, true]);
    }
}
