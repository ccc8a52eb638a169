// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration engine.  Given one point of the complex
//! plane, this module answers the only question the renderer ever
//! asks: how many iterations of the chosen recurrence survive before
//! the orbit diverges, and where was the orbit when it did?
//!
//! All the fractals here are variations on `z = z^2 + c`.  The
//! variations differ in what they do to `z` just before squaring it,
//! and in what power they raise it to; both are fixed by the
//! [`Fractal`] value for the lifetime of a render, so the inner loop
//! for each variant contains no per-iteration branching on the
//! variant.

use num::Complex;

/// Which member of the Mandelbrot family to iterate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fractal {
    /// The classic `z^2 + c`.
    Mandelbrot,
    /// Also known as the Tricorn: `z` is conjugated before squaring.
    Mandelbar,
    /// Both components of `z` are folded to absolute values (the
    /// imaginary one negated) before squaring.
    BurningShip,
    /// `z^p + c` for a power of three or more.
    Multibrot(u32),
}

impl Fractal {
    /// Maps the numeric selector the command line uses onto a variant:
    /// 0 Mandelbrot, 1 Mandelbar, 2 Burning Ship, and any larger value
    /// is the Multibrot of that power.
    pub fn from_selector(set: u32) -> Fractal {
        match set {
            0 => Fractal::Mandelbrot,
            1 => Fractal::Mandelbar,
            2 => Fractal::BurningShip,
            p => Fractal::Multibrot(p),
        }
    }

    /// Iterates a single point and reports how it left (or failed to
    /// leave) the set.
    ///
    /// `c` is the point's complex coordinate; it always seeds the
    /// orbit.  In Julia mode the fixed `julia` parameter is the
    /// constant added on every iteration, otherwise `c` itself is.
    /// `imax` caps the iteration count and `r2` is the squared escape
    /// radius: iteration stops as soon as `|z|^2` exceeds it.
    ///
    /// The function is total.  Degenerate inputs (NaN or infinite
    /// coordinates from a broken viewport) do not fault; they just
    /// propagate through the arithmetic and come out as garbage
    /// colors, which is all a best-effort image generator owes them.
    pub fn escape_time(
        &self,
        c: Complex<f64>,
        julia: Option<Complex<f64>>,
        imax: u32,
        r2: f64,
    ) -> Orbit {
        // The cardioid and period-2 bulb cover most of the interior of
        // the plain Mandelbrot set, and membership in either can be
        // decided without iterating.  Only valid for power 2, and only
        // when c is the additive constant, so Julia renders skip it.
        if let Fractal::Mandelbrot = *self {
            if julia.is_none() && inside_known_bulbs(c) {
                return Orbit { n: imax, z: c };
            }
        }
        let k = julia.unwrap_or(c);
        match *self {
            Fractal::Mandelbrot => iterate(c, k, imax, r2, 2, |z| z),
            Fractal::Mandelbar => iterate(c, k, imax, r2, 2, |z| z.conj()),
            Fractal::BurningShip => {
                iterate(c, k, imax, r2, 2, |z| Complex::new(z.re.abs(), -z.im.abs()))
            }
            Fractal::Multibrot(p) => iterate(c, k, imax, r2, p, |z| z),
        }
    }
}

/// The result of iterating a single point: the number of completed
/// iterations (between 0 and the cap, inclusive) and the orbit value
/// at the point of escape or at the cap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbit {
    /// Completed iterations.  Equal to the cap when the orbit never
    /// escaped.
    pub n: u32,
    /// The orbit value where iteration stopped.
    pub z: Complex<f64>,
}

/// The shared iteration loop.  `fold` is the variant's pre-squaring
/// transform and `power` the exponent; `z^power` is computed by
/// repeated multiplication of the folded value by itself, `power - 1`
/// multiplications in all, starting from its square.  Powers below
/// three collapse to a single squaring.  The escape test runs after
/// the constant is added, and an escaping step is not counted in `n`.
fn iterate<F>(c: Complex<f64>, k: Complex<f64>, imax: u32, r2: f64, power: u32, fold: F) -> Orbit
where
    F: Fn(Complex<f64>) -> Complex<f64>,
{
    let mut z = c;
    let mut n = 0;
    while n < imax {
        let w = fold(z);
        let mut zp = w * w;
        let mut p = power;
        while p > 2 {
            zp = zp * w;
            p -= 1;
        }
        z = zp + k;
        if z.norm_sqr() > r2 {
            break;
        }
        n += 1;
    }
    Orbit { n, z }
}

/// Membership test for the main cardioid and the period-2 bulb of the
/// Mandelbrot set.  Points inside either never escape, so the caller
/// can skip iterating them entirely.
fn inside_known_bulbs(c: Complex<f64>) -> bool {
    let qt1 = c.re - 0.25;
    let qt2 = c.im * c.im;
    let q = qt1 * qt1 + qt2;
    if q * (q + qt1) < qt2 * 0.25 {
        return true;
    }
    let b = c.re + 1.0;
    b * b + qt2 < 0.0625
}
