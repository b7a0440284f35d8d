// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the forward energy of an image
//!
//! Forward energy, as described in [Rubinstein, Shamir & Avidan
//! (2008)], charges a pixel not for its own gradient but for the new
//! adjacencies its removal would create.  Removing pixel (x, y) joins
//! its left and right neighbours, and depending on where the seam goes
//! next it also joins the pixel above to one of them:
//!
//! ```text
//!   CU(x,y) = |I(x+1,y) − I(x−1,y)|
//!   CL(x,y) = |I(x,y−1) − I(x−1,y)| + CU(x,y)
//!   CR(x,y) = |I(x,y−1) − I(x+1,y)| + CU(x,y)
//! ```
//!
//! A running minimum is carried down the image, and the grid we return
//! records, for each pixel, *which* of the three transition costs won
//! rather than the cumulative total.  Left and right neighbours wrap
//! around the row.

use crate::cq;
use crate::edges::wrapped_neighbors;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive};
use itertools::iproduct;
use num_traits::NumCast;

/// Per-pixel local forward-energy costs.  Row 0 is always zero.
pub type EnergyGrid = TwoDimensionalMap<f64>;

// ITU-R 601 weights in 14-bit fixed point, in R, G, B order.  They
// sum to 1 << LUMA_SHIFT.
const LUMA_WEIGHTS: [u64; 3] = [4899, 9617, 1868];
const LUMA_SHIFT: u32 = 14;

/// Pixel -> luminance.  Channels are truncated to whole sample values
/// and weighted in fixed point with round-half-up, which is exactly
/// what an 8-bit grayscale conversion of the working image produces.
#[inline]
pub fn luminance<P, S>(p: &P) -> f64
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let weighted: u64 = p
        .to_rgb()
        .0
        .iter()
        .zip(LUMA_WEIGHTS.iter())
        .map(|(c, w)| {
            let c: f64 = NumCast::from(*c).unwrap_or(0.0);
            (c.max(0.0) as u64) * w
        })
        .sum();
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as f64
}

/// Image -> luminance map.
pub fn luminance_map<I, P, S>(image: &I) -> TwoDimensionalMap<f64>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut luma = TwoDimensionalMap::new(width, height);
    iproduct!(0..height, 0..width)
        .for_each(|(y, x)| luma[(x, y)] = luminance(&image.get_pixel(x, y)));
    luma
}

/// The three ways a seam can arrive at a pixel, and what each costs.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct TransitionCosts {
    /// Arriving from directly above.
    pub up: f64,
    /// Arriving from the upper left.
    pub left: f64,
    /// Arriving from the upper right.
    pub right: f64,
}

/// Given a row of luminance values and the row above it, compute the
/// transition costs for every column.  Each column is independent of
/// the others.
pub fn transition_costs(row: &[f64], above: &[f64]) -> Vec<TransitionCosts> {
    let width = row.len() as u32;
    (0..width)
        .map(|x| {
            let (xl, xr) = wrapped_neighbors(x, width);
            let (left, right, up) = (row[xl as usize], row[xr as usize], above[x as usize]);
            let cost_up = (right - left).abs();
            TransitionCosts {
                up: cost_up,
                left: (up - left).abs() + cost_up,
                right: (up - right).abs() + cost_up,
            }
        })
        .collect()
}

// Candidates are (running total, local cost), in up, left, right
// order.  Only a strictly smaller total displaces an earlier one.
#[inline]
fn cheapest(candidates: &[(f64, f64); 3]) -> (f64, f64) {
    candidates[1..]
        .iter()
        .fold(candidates[0], |best, &c| cq!(c.0 < best.0, c, best))
}

/// Compute the forward energy of every pixel in an image.  This is
/// generic on the image type; every pixel is reduced to luminance
/// first.
pub fn forward_energy<I, P, S>(image: &I) -> EnergyGrid
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let luma = luminance_map(image);
    let mut energy = EnergyGrid::new(width, height);

    // The running minimum for the previous row.  Row 0 has no
    // predecessor and starts at zero.
    let mut running = vec![0.0; width as usize];

    for y in 1..height {
        let costs = transition_costs(luma.row(y), luma.row(y - 1));
        let next: Vec<f64> = costs
            .iter()
            .zip(0..width)
            .map(|(c, x)| {
                let (xl, xr) = wrapped_neighbors(x, width);
                let (total, cost) = cheapest(&[
                    (running[x as usize] + c.up, c.up),
                    (running[xl as usize] + c.left, c.left),
                    (running[xr as usize] + c.right, c.right),
                ]);
                energy[(x, y)] = cost;
                total
            })
            .collect();
        running = next;
    }
    energy
}
