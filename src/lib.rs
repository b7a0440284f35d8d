// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing with forward-energy seam carving.
//!
//! `carve` is the whole story for most callers: hand it an image and a
//! signed column count and it either removes that many seams one at a
//! time, or finds that many seams and inserts them all in one batch.

pub mod config;
pub mod delta;
pub mod dump;
pub mod edges;
pub mod energy;
pub mod error;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;
pub mod working;

pub use config::CarveConfig;
pub use delta::{DeltaEstimator, WidthDifference};
pub use energy::{forward_energy, EnergyGrid};
pub use error::{CarveError, Result};
pub use seamcarver::{carve, insert_seams, remove_seam, remove_seams, SeamCarver};
pub use seamfinder::{find_minimum_seam, RetentionMask, Seam, SeamFinder};
pub use working::CarveImage;
