//! Contains the Viewport struct, which describes a relationship
//! between the output pixel grid and a rectangular window on the
//! complex plane.  The window is given the way the command line gives
//! it: a center point, the width and height of the region in
//! complex-plane units, and the width of the image in pixels.  The
//! image height is derived from those so the region's aspect ratio is
//! preserved.

use num::Complex;

/// A rectangular window on the complex plane together with the pixel
/// grid it will be sampled into.  All of the derived quantities are
/// computed once at construction; a Viewport is immutable afterwards.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    w: f64,
    h: f64,
    pw: u32,
    ph: u32,
    xmin: f64,
    ymin: f64,
    dx: f64,
    dy: f64,
}

impl Viewport {
    /// Constructor.  Takes the center of the region, its dimensions in
    /// complex-plane units, and the output width in pixels.  The
    /// region must have positive area and the image must be at least
    /// one pixel wide.
    pub fn new(cx: f64, cy: f64, w: f64, h: f64, pw: u32) -> Result<Viewport, String> {
        if !(w > 0.0) {
            return Err("The region width must be positive.".to_string());
        }
        if !(h > 0.0) {
            return Err("The region height must be positive.".to_string());
        }
        if pw == 0 {
            return Err("The image must be at least one pixel wide.".to_string());
        }
        let ph = (h * f64::from(pw) / w).round() as u32;
        Ok(Viewport {
            w,
            h,
            pw,
            ph,
            xmin: cx - w / 2.0,
            ymin: cy - h / 2.0,
            dx: w / f64::from(pw),
            dy: h / f64::from(ph),
        })
    }

    /// The output image width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.pw
    }

    /// The output image height in pixels, derived from the width so
    /// that a square region comes out as a square image.
    pub fn pixel_height(&self) -> u32 {
        self.ph
    }

    /// The total number of pixels in the output grid.  Used to size
    /// the frame buffer.
    pub fn len(&self) -> usize {
        self.pw as usize * self.ph as usize
    }

    /// Describes that the grid has no pixels at all, which happens
    /// when the derived height rounds to zero.
    pub fn is_empty(&self) -> bool {
        self.ph == 0
    }

    /// Given the column and row of a pixel, return the complex number
    /// at the equivalent location on the complex plane.  Row zero is
    /// the bottom edge of the region; rows count upward from there.
    pub fn point_at(&self, x: u32, y: u32) -> Complex<f64> {
        Complex::new(
            self.xmin + self.dx * f64::from(x),
            self.ymin + self.dy * f64::from(y),
        )
    }
}
