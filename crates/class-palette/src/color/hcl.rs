//! Hue/chroma/lightness: the polar form of [`Lab`].
//!
//! The optimizer constrains colors by hue and lightness, which are awkward
//! to bound in Cartesian Lab but trivial in polar form.

use super::lab::Lab;
use super::srgb::Srgb;

/// Upper bound used when clamping chroma.
pub const CHROMA_MAX: f64 = 100.0;

/// Hcl: polar form of Lab (hue, chroma, lightness).
///
/// # Components
///
/// - `h`: Hue angle in degrees, normalized to `[0, 360)`
/// - `c`: Chroma, `sqrt(a^2 + b^2)`
/// - `l`: Lightness, same as Lab L
///
/// # Note
///
/// Hue is undefined for achromatic colors; the conversion sets it to 0.0,
/// which is harmless because a zero chroma maps back to the neutral axis
/// regardless of hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcl {
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    /// Chroma
    pub c: f64,
    /// Lightness
    pub l: f64,
}

impl Hcl {
    /// Create a new Hcl color. Hue is wrapped into `[0, 360)`.
    #[inline]
    pub fn new(h: f64, c: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            c,
            l,
        }
    }

    /// Clamp hue, chroma and lightness into the given ranges.
    ///
    /// Chroma is always clamped to `[0, 100]`. NaN components collapse to
    /// the lower bound of their range.
    pub fn constrain(self, hue: (f64, f64), lightness: (f64, f64)) -> Self {
        Self {
            h: clamp_or_low(self.h, hue),
            c: clamp_or_low(self.c, (0.0, CHROMA_MAX)),
            l: clamp_or_low(self.l, lightness),
        }
    }
}

/// Wrap a hue angle into `[0, 360)`; NaN becomes 0.
#[inline]
pub fn normalize_hue(h: f64) -> f64 {
    if h.is_finite() {
        let wrapped = h.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            0.0
        } else {
            wrapped
        }
    } else {
        0.0
    }
}

#[inline]
fn clamp_or_low(value: f64, (low, high): (f64, f64)) -> f64 {
    if value.is_nan() {
        low
    } else {
        value.max(low).min(high)
    }
}

impl From<Lab> for Hcl {
    fn from(lab: Lab) -> Self {
        let c = lab.chroma();
        let h = if lab.a == 0.0 && lab.b == 0.0 {
            0.0
        } else {
            lab.b.atan2(lab.a).to_degrees()
        };
        Hcl::new(h, c, lab.l)
    }
}

impl From<Hcl> for Lab {
    fn from(hcl: Hcl) -> Self {
        let h = hcl.h.to_radians();
        Lab::new(hcl.l, h.cos() * hcl.c, h.sin() * hcl.c)
    }
}

impl From<Srgb> for Hcl {
    #[inline]
    fn from(rgb: Srgb) -> Self {
        Hcl::from(Lab::from(rgb))
    }
}

impl From<Hcl> for Srgb {
    #[inline]
    fn from(hcl: Hcl) -> Self {
        Srgb::from(Lab::from(hcl))
    }
}
