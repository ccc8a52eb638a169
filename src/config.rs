//! The resolved render configuration: every knob the renderer reads,
//! with the defaults the command line has always shipped, plus the
//! forgiving hex-color parsing the palette options use.  By the time a
//! [`RenderConfig`] reaches the numeric core it must be valid; the
//! [`RenderConfig::validate`] check is the gate, and violating it is a
//! configuration error, never a render-time fault.

use color::ColorMode;
use fractal::Fractal;
use num::Complex;
use palette::Color;

/// The gradient used when the palette option is absent or unusable.
const DEFAULT_PALETTE: &str = "000/fff";

/// What can be wrong with a configuration.  These are caller-contract
/// violations: the numeric core itself never reports an error, so this
/// is the only error taxonomy in the system.
#[derive(Debug, Fail)]
pub enum ConfigError {
    /// The image must have at least one pixel column.
    #[fail(display = "image width must be at least one pixel")]
    ZeroWidth,
    /// The complex-plane region must have positive area.
    #[fail(display = "region dimensions must be positive, got {}/{}", w, h)]
    BadRegion {
        /// Offending region width.
        w: f64,
        /// Offending region height.
        h: f64,
    },
    /// At least one iteration per pixel.
    #[fail(display = "the iteration cap must be at least one")]
    ZeroIterations,
    /// The escape radius must be a positive number.
    #[fail(display = "the escape radius must be positive, got {}", r)]
    BadRadius {
        /// Offending radius.
        r: f64,
    },
    /// The gradient needs at least one keyframe.
    #[fail(display = "a palette needs at least one keyframe color")]
    EmptyPalette,
}

/// A fully resolved set of render parameters.  Owned by the caller and
/// handed to the renderer by reference; nothing in here changes during
/// a render.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Output image width in pixels.
    pub width: u32,
    /// Center of the rendered region, as (re, im).
    pub center: (f64, f64),
    /// Dimensions of the rendered region in complex-plane units.
    pub dim: (f64, f64),
    /// Iteration cap per pixel.
    pub imax: u32,
    /// Escape radius.
    pub radius: f64,
    /// Numeric fractal selector (see [`Fractal::from_selector`]).
    pub set: u32,
    /// Julia parameter; `Some` switches the render to Julia mode.
    pub julia: Option<Complex<f64>>,
    /// Use the normalized iteration count for smooth gradients.
    pub smooth: bool,
    /// Color for points that never escape.
    pub inset: Color,
    /// Gradient keyframes, in interpolation order.
    pub keyframes: Vec<Color>,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 640,
            center: (0.0, 0.0),
            dim: (4.0, 4.0),
            imax: 128,
            radius: 2.0,
            set: 0,
            julia: None,
            smooth: false,
            inset: Color::new(0, 0, 0),
            keyframes: parse_palette(DEFAULT_PALETTE),
        }
    }
}

impl RenderConfig {
    /// The fractal variant this configuration selects.
    pub fn fractal(&self) -> Fractal {
        Fractal::from_selector(self.set)
    }

    /// The coloring mode this configuration selects.
    pub fn mode(&self) -> ColorMode {
        if self.smooth {
            ColorMode::Smooth
        } else {
            ColorMode::Banded
        }
    }

    /// Checks the caller contract the numeric core assumes.  A
    /// configuration that fails here would not crash the core, but the
    /// image it produced would be garbage, so it is rejected up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if !(self.dim.0 > 0.0) || !(self.dim.1 > 0.0) {
            return Err(ConfigError::BadRegion {
                w: self.dim.0,
                h: self.dim.1,
            });
        }
        if self.imax == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !(self.radius > 0.0) {
            return Err(ConfigError::BadRadius { r: self.radius });
        }
        if self.keyframes.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

/// Parses one hex color token.  Both the 6-digit `RRGGBB` and 3-digit
/// `RGB` (each digit doubled) forms are accepted, in either case.
/// Parsing is deliberately forgiving: a token of any other length is
/// black, and a channel containing a non-hex digit comes out as zero.
pub fn parse_color(token: &str) -> Color {
    let t: Vec<char> = token.chars().collect();
    match t.len() {
        6 => Color::new(
            hex_byte(t[0], t[1]),
            hex_byte(t[2], t[3]),
            hex_byte(t[4], t[5]),
        ),
        3 => Color::new(
            hex_byte(t[0], t[0]),
            hex_byte(t[1], t[1]),
            hex_byte(t[2], t[2]),
        ),
        _ => Color::new(0, 0, 0),
    }
}

/// Parses a `/`-separated list of hex color tokens, skipping empty
/// entries.
pub fn parse_palette(s: &str) -> Vec<Color> {
    s.split('/').filter(|t| !t.is_empty()).map(parse_color).collect()
}

/// Resolves the palette option: an empty list falls back to the
/// default gradient, and so does a list of exactly one keyframe, so
/// the command line always renders a real ramp.  The degenerate
/// one-keyframe palette stays reachable through
/// [`::palette::Palette::build`] directly.
pub fn resolve_keyframes(arg: &str) -> Vec<Color> {
    let keyframes = parse_palette(arg);
    if keyframes.len() < 2 {
        parse_palette(DEFAULT_PALETTE)
    } else {
        keyframes
    }
}

/// Resolves the in-set color option: the first color of the list, or
/// black when the list is empty.
pub fn resolve_inset(arg: &str) -> Color {
    parse_palette(arg)
        .first()
        .cloned()
        .unwrap_or_else(|| Color::new(0, 0, 0))
}

fn hex_byte(hi: char, lo: char) -> u8 {
    match (hi.to_digit(16), lo.to_digit(16)) {
        (Some(h), Some(l)) => (h * 16 + l) as u8,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_tokens_parse_per_channel() {
        assert_eq!(parse_color("ff8000"), Color::new(255, 128, 0));
        assert_eq!(parse_color("FF8000"), Color::new(255, 128, 0));
    }

    #[test]
    fn three_digit_tokens_double_each_digit() {
        assert_eq!(parse_color("f80"), Color::new(255, 136, 0));
        assert_eq!(parse_color("000"), Color::new(0, 0, 0));
    }

    #[test]
    fn malformed_tokens_fall_back_to_black() {
        assert_eq!(parse_color(""), Color::new(0, 0, 0));
        assert_eq!(parse_color("ffff"), Color::new(0, 0, 0));
        assert_eq!(parse_color("not-a-color"), Color::new(0, 0, 0));
    }

    #[test]
    fn non_hex_digits_zero_their_channel() {
        assert_eq!(parse_color("ffxx00"), Color::new(255, 0, 0));
        assert_eq!(parse_color("zf0"), Color::new(0, 255, 0));
    }

    #[test]
    fn palette_lists_split_on_slashes_and_skip_empties() {
        assert_eq!(
            parse_palette("000/fff"),
            vec![Color::new(0, 0, 0), Color::new(255, 255, 255)]
        );
        assert_eq!(parse_palette("//f00//"), vec![Color::new(255, 0, 0)]);
        assert_eq!(parse_palette(""), vec![]);
    }

    #[test]
    fn lone_keyframes_resolve_to_the_default_gradient() {
        let fallback = parse_palette("000/fff");
        assert_eq!(resolve_keyframes("f00"), fallback);
        assert_eq!(resolve_keyframes(""), fallback);
        assert_ne!(resolve_keyframes("f00/0f0"), fallback);
    }

    #[test]
    fn inset_resolution_takes_the_first_color() {
        assert_eq!(resolve_inset("123456/fff"), Color::new(0x12, 0x34, 0x56));
        assert_eq!(resolve_inset(""), Color::new(0, 0, 0));
    }

    #[test]
    fn default_configuration_is_the_classic_square_render() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.center, (0.0, 0.0));
        assert_eq!(cfg.dim, (4.0, 4.0));
        assert_eq!(cfg.imax, 128);
        assert_eq!(cfg.radius, 2.0);
        assert_eq!(cfg.fractal(), Fractal::Mandelbrot);
        assert_eq!(cfg.julia, None);
        assert_eq!(cfg.mode(), ColorMode::Banded);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validation_rejects_contract_violations() {
        let mut cfg = RenderConfig::default();
        cfg.width = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RenderConfig::default();
        cfg.dim = (4.0, -4.0);
        assert!(cfg.validate().is_err());

        let mut cfg = RenderConfig::default();
        cfg.dim = (::std::f64::NAN, 4.0);
        assert!(cfg.validate().is_err());

        let mut cfg = RenderConfig::default();
        cfg.imax = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RenderConfig::default();
        cfg.radius = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = RenderConfig::default();
        cfg.keyframes.clear();
        assert!(cfg.validate().is_err());
    }
}
