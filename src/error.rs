// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Carving errors
//!
//! Everything that can go wrong inside the carver is a logic error on
//! the caller's side; nothing here is transient and nothing is retried.

use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    /// `carve` needs a non-empty image, a non-empty result, and at
    /// most `width` inserted seams.
    #[fail(
        display = "cannot carve a {}x{} image by {} columns",
        width, height, dx
    )]
    PreconditionViolation { width: u32, height: u32, dx: i32 },

    #[fail(
        display = "retention mask is {}x{} but the image is {}x{}",
        mask_width, mask_height, width, height
    )]
    MaskDimensions {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    /// Every row of a retention mask must drop exactly one pixel.
    #[fail(
        display = "retention mask row {} removes {} pixels, expected exactly one",
        row, removed
    )]
    InvalidMask { row: u32, removed: usize },

    #[fail(display = "seam has {} entries, the image has {} rows", actual, expected)]
    SeamLength { expected: u32, actual: usize },

    #[fail(
        display = "seam column {} in row {} is outside an image {} wide",
        column, row, width
    )]
    SeamOutOfBounds { row: u32, column: u32, width: u32 },

    #[fail(display = "cannot insert zero seams")]
    ZeroSeams,

    #[fail(display = "malformed image: {}", _0)]
    MalformedImage(String),
}

pub type Result<T> = std::result::Result<T, CarveError>;
