// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rasterizer.  Walks the output grid row by row, runs the
//! escape-time engine on every pixel's coordinate, picks a palette
//! entry for the result, and hands everything to two caller-supplied
//! callbacks: one that receives the image dimensions exactly once
//! before any pixel, and one that receives every pixel's color in
//! raster order.  The crate has no opinion about what the callbacks do
//! with any of it.
//!
//! Every pixel is independent of every other pixel, so the threaded
//! driver farms rows out to a small crew of workers and lets each fill
//! its rows of the frame buffer in place.  The callbacks still see the
//! pixels in exactly the serial order: delivery happens from the
//! buffer after the workers join.

extern crate crossbeam;

use std::sync::{Arc, Mutex};

use itertools::iproduct;
use num::Complex;

use color::ColorMode;
use fractal::{Fractal, Orbit};
use palette::{Color, Palette};
use viewport::Viewport;

/// Everything that parameterizes one frame.  Immutable for the
/// lifetime of the render.
#[derive(Clone, Debug)]
pub struct RenderSpec {
    /// The window on the complex plane and the output grid.
    pub viewport: Viewport,
    /// Which recurrence to iterate.
    pub fractal: Fractal,
    /// The fixed Julia parameter, when rendering the Julia variant.
    pub julia: Option<Complex<f64>>,
    /// Iteration cap per pixel.
    pub imax: u32,
    /// Escape radius.
    pub radius: f64,
    /// Banded or smooth coloring.
    pub mode: ColorMode,
}

/// Renders one frame from a spec and a palette built for it.  The
/// palette must outlive the render and is only ever read.
pub struct Renderer<'a> {
    spec: &'a RenderSpec,
    palette: &'a Palette,
}

impl<'a> Renderer<'a> {
    /// Constructor.  Rejects the caller-contract violations the
    /// arithmetic cannot absorb meaningfully.
    pub fn new(spec: &'a RenderSpec, palette: &'a Palette) -> Result<Renderer<'a>, String> {
        if spec.imax == 0 {
            return Err("The iteration cap must be at least one.".to_string());
        }
        if !(spec.radius > 0.0) {
            return Err("The escape radius must be positive.".to_string());
        }
        Ok(Renderer { spec, palette })
    }

    /// The single-threaded driver.  Emits the dimensions, then streams
    /// every pixel's color straight to the callback, rows from the top
    /// of the image (the highest imaginary coordinate) downward,
    /// columns left to right.
    pub fn render<D, C>(&self, dimensions: D, mut color: C)
    where
        D: FnOnce(u32, u32),
        C: FnMut(u8, u8, u8),
    {
        let vp = &self.spec.viewport;
        let (pw, ph) = (vp.pixel_width(), vp.pixel_height());
        dimensions(pw, ph);
        let r2 = self.spec.radius * self.spec.radius;
        let logr = self.spec.radius.ln();
        for (y, x) in iproduct!((0..ph).rev(), 0..pw) {
            let entry = self.shade(vp.point_at(x, y), r2, logr);
            color(entry.r, entry.g, entry.b);
        }
    }

    /// The multi-threaded driver.  Workers pull `(row, slice)` jobs
    /// off a shared queue and fill disjoint rows of one frame buffer;
    /// the callbacks fire after the join, so the caller sees the exact
    /// pixel order of [`Renderer::render`] no matter how the rows were
    /// scheduled.
    pub fn render_threaded<D, C>(&self, threads: usize, dimensions: D, mut color: C)
    where
        D: FnOnce(u32, u32),
        C: FnMut(u8, u8, u8),
    {
        let vp = &self.spec.viewport;
        let (pw, ph) = (vp.pixel_width(), vp.pixel_height());
        dimensions(pw, ph);
        let r2 = self.spec.radius * self.spec.radius;
        let logr = self.spec.radius.ln();
        let mut frame = vec![Color::new(0, 0, 0); vp.len()];
        crossbeam::scope(|spawner| {
            let rows: Vec<(usize, &mut [Color])> =
                frame.chunks_mut(pw as usize).enumerate().collect();
            let rows = Arc::new(Mutex::new(rows.into_iter()));
            for _ in 0..threads.max(1) {
                let rows = rows.clone();
                spawner.spawn(move |_| loop {
                    let job = { rows.lock().unwrap().next() };
                    match job {
                        Some((i, row)) => {
                            let y = ph - 1 - i as u32;
                            for (x, slot) in row.iter_mut().enumerate() {
                                *slot = self.shade(vp.point_at(x as u32, y), r2, logr);
                            }
                        }
                        None => break,
                    }
                });
            }
        })
        .unwrap();
        for entry in &frame {
            color(entry.r, entry.g, entry.b);
        }
    }

    /// One pixel: iterate the orbit, then look its color up.
    fn shade(&self, c: Complex<f64>, r2: f64, logr: f64) -> Color {
        let Orbit { n, z } = self
            .spec
            .fractal
            .escape_time(c, self.spec.julia, self.spec.imax, r2);
        let index = self
            .spec
            .mode
            .index(self.palette.total(), n, self.spec.imax, z, logr);
        self.palette.color(index)
    }
}
