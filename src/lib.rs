#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot-family fractal renderer
//!
//! Generates an image of the Mandelbrot set or certain related
//! fractals.  The Mandelbrot takes a point on the complex plane and
//! repeatedly squares it and adds the point back in, measuring how
//! quickly that number goes to infinity.  This "velocity" is the
//! number used to color the image: points that escape early get colors
//! from one end of a gradient, points that escape late get colors from
//! the other end, and points that never escape at all get a single
//! reserved "in-set" color.
//!
//! Several relatives of the Mandelbrot come along for the ride.  The
//! Mandelbar (or Tricorn) conjugates the value before squaring it, the
//! Burning Ship folds it into one quadrant first, and the Multibrot
//! raises it to powers higher than two.  Each of them also has a Julia
//! variant, in which the added constant is fixed for the whole image
//! and the pixel's coordinate seeds the iteration instead.
//!
//! The crate is split the way the work splits: [`viewport`] maps the
//! pixel grid onto the complex plane, [`fractal`] iterates one point,
//! [`palette`] turns a handful of keyframe colors into a dense
//! gradient, [`color`] picks a gradient entry for a finished orbit,
//! and [`render`] walks the whole grid and hands the results to a pair
//! of caller-supplied callbacks.  What happens to those callbacks --
//! writing a PPM file, usually -- is the caller's business.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate num;

pub mod color;
pub mod config;
pub mod fractal;
pub mod palette;
pub mod render;
pub mod viewport;

pub use color::ColorMode;
pub use config::RenderConfig;
pub use fractal::{Fractal, Orbit};
pub use palette::{Color, Palette};
pub use render::{RenderSpec, Renderer};
pub use viewport::Viewport;
