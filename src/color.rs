//! Maps a finished orbit to an index into the palette.  Two mappings
//! are offered: the banded map uses the raw integer iteration count,
//! which collapses neighboring counts into visible contour bands, and
//! the smooth map uses the normalized iteration count, a continuous
//! estimate derived from how far past the escape radius the orbit
//! landed, which melts the bands into a gradient.

use num::Complex;
use std::f64::consts::LN_2;

/// Banded versus smooth coloring, chosen once per render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Discrete bands from the raw iteration count.
    Banded,
    /// Continuous gradient from the normalized iteration count.
    Smooth,
}

impl ColorMode {
    /// Maps an orbit to a palette index in `0..=total`.
    ///
    /// `total` is the palette's in-set index and must be at least one;
    /// `n` is the completed iteration count, `imax` the cap, `z` the
    /// final orbit value, and `logr` the natural log of the escape
    /// radius.  Only an orbit that reached the cap ever lands on
    /// `total` -- that entry is reserved for points inside the set.
    pub fn index(&self, total: usize, n: u32, imax: u32, z: Complex<f64>, logr: f64) -> usize {
        match *self {
            ColorMode::Banded => banded_index(total, n, imax),
            ColorMode::Smooth => smooth_index(total, n, imax, z, logr),
        }
    }
}

fn banded_index(total: usize, n: u32, imax: u32) -> usize {
    n as usize * total / imax as usize
}

/// The normalized iteration count `mu = n - log2(log |z| / log r)`
/// scaled onto the palette.  The estimate can land slightly outside
/// the valid range, so it is clamped to stay off the in-set entry.
fn smooth_index(total: usize, n: u32, imax: u32, z: Complex<f64>, logr: f64) -> usize {
    if n >= imax {
        return total;
    }
    let mu = f64::from(n) - (z.norm_sqr().sqrt().ln() / logr).ln() / LN_2;
    let index = (mu * total as f64 / f64::from(imax)) as i64;
    if index < 0 {
        0
    } else if index as usize >= total {
        total - 1
    } else {
        index as usize
    }
}
