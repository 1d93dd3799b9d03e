//! sRGB color type
//!
//! sRGB is the representation palettes are drawn, perturbed, and emitted in.
//! Channels live on the familiar 0..=255 scale but are stored as `f64`, so
//! colors coming back from Lab or Hcl keep their sub-integer precision until
//! they are written out.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// Upper bound of every sRGB channel.
pub const CHANNEL_MAX: f64 = 255.0;

/// A color in sRGB color space.
///
/// Every constructor clamps its channels to `0.0..=255.0` and maps NaN to
/// zero, so an `Srgb` is always a valid, in-gamut color no matter which
/// conversion produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (0.0..=255.0)
    pub r: f64,
    /// Green channel (0.0..=255.0)
    pub g: f64,
    /// Blue channel (0.0..=255.0)
    pub b: f64,
}

/// Clamp a single channel into the valid range.
#[inline]
pub(crate) fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, CHANNEL_MAX)
    }
}

impl Srgb {
    /// Create a new Srgb color, clamping each channel to `0.0..=255.0`.
    ///
    /// # Example
    /// ```
    /// use class_palette::Srgb;
    /// let c = Srgb::new(300.0, -4.0, 12.5);
    /// assert_eq!(c, Srgb::new(255.0, 0.0, 12.5));
    /// ```
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
        }
    }

    /// Create an Srgb color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B], rounding each channel.
    ///
    /// # Example
    /// ```
    /// use class_palette::Srgb;
    /// assert_eq!(Srgb::new(254.6, 0.4, 128.0).to_bytes(), [255, 0, 128]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            clamp_channel(self.r).round() as u8,
            clamp_channel(self.g).round() as u8,
            clamp_channel(self.b).round() as u8,
        ]
    }

    /// Format as a lowercase `#rrggbb` string.
    ///
    /// # Example
    /// ```
    /// use class_palette::Srgb;
    /// assert_eq!(Srgb::from_u8(255, 128, 0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Returns true if every channel lies within `0.0..=255.0`.
    #[inline]
    pub fn is_valid(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=CHANNEL_MAX).contains(c))
    }

    /// Offset each channel and clamp the result back into range.
    #[inline]
    pub fn offset(self, dr: f64, dg: f64, db: f64) -> Self {
        Self::new(self.r + dr, self.g + dg, self.b + db)
    }
}

impl fmt::Display for Srgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Supports `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`. Parsing is
    /// case-insensitive and surrounding whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use class_palette::Srgb;
    ///
    /// let white: Srgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white.r, 255.0);
    ///
    /// let red: Srgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Srgb::from_u8(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s
            .chars()
            .enumerate()
            .map(|(position, found)| {
                found
                    .to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::NotHexDigit { position, found })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match *digits.as_slice() {
            // Shorthand: each digit doubles (0xF -> 0xFF)
            [r, g, b] => Ok(Self::from_u8(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => {
                Ok(Self::from_u8(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0))
            }
            _ => Err(ParseColorError::DigitCount(digits.len())),
        }
    }
}
