//! Color types and conversion utilities
//!
//! Three views of the same color, each used where it is cheapest:
//!
//! - [`Srgb`]: palettes are drawn, jittered and emitted in sRGB (0..=255)
//! - [`Lab`]: perceptual distance ([`ciede2000`]) and name lookup
//! - [`Hcl`]: hue and lightness constraints during perturbation
//!
//! Every conversion into [`Srgb`] clamps, so no chain of conversions can
//! produce an out-of-gamut or NaN channel.
//!
//! # Example
//!
//! ```
//! use class_palette::{Hcl, Lab, Srgb};
//!
//! let orange = Srgb::from_u8(255, 128, 0);
//! let lab = Lab::from(orange);
//! let hcl = Hcl::from(lab);
//! assert!(hcl.h > 40.0 && hcl.h < 80.0);
//!
//! let back = Srgb::from(hcl);
//! assert_eq!(back.to_bytes(), [255, 128, 0]);
//! ```

mod difference;
mod error;
mod hcl;
mod lab;
mod srgb;

pub use difference::ciede2000;
pub use error::ParseColorError;
pub use hcl::{normalize_hue, Hcl, CHROMA_MAX};
pub use lab::Lab;
pub use srgb::{Srgb, CHANNEL_MAX};

impl Srgb {
    /// CIEDE2000 difference between two sRGB colors.
    #[inline]
    pub fn difference(self, other: Srgb) -> f64 {
        ciede2000(Lab::from(self), Lab::from(other))
    }
}
