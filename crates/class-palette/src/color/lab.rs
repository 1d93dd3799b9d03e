//! CIELAB color space
//!
//! Lab is where perceptual distance (CIEDE2000) and the color-name lookup
//! both operate. The conversion follows the sRGB → XYZ → Lab path used by
//! the common web color libraries: sRGB primaries Bradford-adapted to a D50
//! white point, so Lab values line up with color-naming corpora collected
//! through browsers.

use super::difference::ciede2000;
use super::srgb::{Srgb, CHANNEL_MAX};

/// D50 reference white, X component.
const XN: f64 = 0.96422;
/// D50 reference white, Y component.
const YN: f64 = 1.0;
/// D50 reference white, Z component.
const ZN: f64 = 0.82521;

const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// A color in CIELAB space.
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green (negative) to red (positive)
/// - `b`: Blue (negative) to yellow (positive)
///
/// Lab values are not clamped; a Lab color outside the sRGB gamut is
/// clamped when it is converted back to [`Srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIEDE2000 color difference to `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use class_palette::Lab;
    ///
    /// let a = Lab::new(50.0, 2.5, 0.0);
    /// let b = Lab::new(50.0, 0.0, -2.5);
    /// assert!((a.difference(b) - 4.3065).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn difference(self, other: Lab) -> f64 {
        ciede2000(self, other)
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

#[inline]
fn srgb_to_linear(channel: f64) -> f64 {
    let c = channel / CHANNEL_MAX;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(linear: f64) -> f64 {
    CHANNEL_MAX
        * if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
}

#[inline]
fn xyz_to_lab(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

#[inline]
fn lab_to_xyz(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}

impl From<Srgb> for Lab {
    /// Convert from sRGB to Lab.
    ///
    /// Exact greys (r == g == b) produce `a == b == 0.0` exactly, so their
    /// hue stays well-defined in [`Hcl`](super::Hcl).
    fn from(rgb: Srgb) -> Self {
        let r = srgb_to_linear(rgb.r);
        let g = srgb_to_linear(rgb.g);
        let b = srgb_to_linear(rgb.b);

        let y = xyz_to_lab((0.2225045 * r + 0.7168786 * g + 0.0606169 * b) / YN);
        let (x, z) = if r == g && g == b {
            (y, y)
        } else {
            (
                xyz_to_lab((0.4360747 * r + 0.3850649 * g + 0.1430804 * b) / XN),
                xyz_to_lab((0.0139322 * r + 0.0971045 * g + 0.7141733 * b) / ZN),
            )
        };

        Lab {
            l: 116.0 * y - 16.0,
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }
}

/// Linear-light sRGB of `lab`, unclamped.
fn lab_to_linear_rgb(lab: Lab) -> [f64; 3] {
    let y = (lab.l + 16.0) / 116.0;
    let x = y + lab.a / 500.0;
    let z = y - lab.b / 200.0;

    let x = XN * lab_to_xyz(x);
    let y = YN * lab_to_xyz(y);
    let z = ZN * lab_to_xyz(z);

    [
        3.1338561 * x - 1.6168667 * y - 0.4906146 * z,
        -0.9787684 * x + 1.9161415 * y + 0.0334540 * z,
        0.0719453 * x - 0.2289914 * y + 1.4052427 * z,
    ]
}

/// Slack on linear channels when testing gamut membership; covers the
/// rounding of the conversion matrices.
const GAMUT_EPSILON: f64 = 1e-6;

impl Lab {
    /// Returns true if `self` converts to sRGB without clamping.
    pub fn in_srgb_gamut(self) -> bool {
        lab_to_linear_rgb(self)
            .iter()
            .all(|&c| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&c))
    }
}

impl From<Lab> for Srgb {
    /// Convert from Lab to sRGB, clamping out-of-gamut results.
    fn from(lab: Lab) -> Self {
        let [r, g, b] = lab_to_linear_rgb(lab);
        Srgb::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }
}
