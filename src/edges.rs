// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Border rules
//!
//! The two dynamic programs treat the left and right edges of a row
//! differently.  The forward-energy pass looks up neighbours
//! circularly: the left neighbour of column 0 is the last column of
//! the same row.  The seam search clamps: column 0 only ever looks at
//! columns 0 and 1 in the row above.  Both rules live here so that the
//! asymmetry is written down exactly once.

use std::ops::RangeInclusive;

/// My ternary expression handler.  While it may seem redundant, it's
/// surprisingly useful when working with complex logic tables, such
/// as the edge (literally) cases in the seam carving algorithm.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

/// The (left, right) neighbours of column `x` in a row `width` wide,
/// wrapping around at both ends.  `width` must be at least 1.
#[inline]
pub fn wrapped_neighbors(x: u32, width: u32) -> (u32, u32) {
    (
        cq!(x == 0, width - 1, x - 1),
        cq!(x + 1 >= width, 0, x + 1),
    )
}

/// The columns `{x-1, x, x+1}` intersected with `[0, width-1]`.
#[inline]
pub fn clamped_neighbors(x: u32, width: u32) -> RangeInclusive<u32> {
    let maxwidth = width - 1;
    cq!(x == 0, 0, x - 1)..=cq!(x >= maxwidth, maxwidth, x + 1)
}
