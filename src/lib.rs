#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Buddhabrot renderer
//!
//! The Buddhabrot is a variant of the Mandelbrot set that plots,
//! rather than how quickly a point escapes, *where* its orbit goes on
//! the way out.  Every point `c` that escapes under `z = z * z + c`
//! leaves a trail of intermediate values; map each of those back onto
//! a pixel, count the visits, and the counts form the image.
//!
//! Most of the plane is boring: points far outside escape at once,
//! points deep inside never do.  The long, detailed orbits start near
//! the boundary of the set, so this renderer first finds that
//! boundary (a coarse black-and-white Mandelbrot, its edges from both
//! sides, widened outward by dilation) and then spends a configurable
//! share of its samples in small squares around those "good points."
//!
//! Sampling runs on a fixed pool of threads.  Each worker owns its own
//! random stream and its own block of counters, so the hot loop shares
//! nothing; the blocks are summed once every worker has been joined.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate rand;

pub mod boundary;
pub mod colormap;
pub mod config;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod mask;
pub mod output;
pub mod planes;
pub mod progress;
pub mod render;
pub mod sampler;

pub use colormap::{Colormap, Palette};
pub use config::Config;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use output::write_image;
pub use render::Renderer;
