//! Move generation for the annealer.
//!
//! A move either swaps two slots or nudges one color and then repairs
//! the palette so that no two colors are closer than
//! [`DISCRIMINABILITY_THRESHOLD`].

use rand::Rng;

use super::schedule::ColorScope;
use crate::color::{Hcl, Lab, Srgb};

/// Largest per-channel offset of a nudge, in 0..=255 units.
pub const DISTURB_STEP: i32 = 50;
/// Minimum CIEDE2000 distance the repair pass enforces between colors.
pub const DISCRIMINABILITY_THRESHOLD: f64 = 10.0;
/// Maximum re-jitters per repair pass.
pub const REPAIR_ATTEMPTS: usize = 100;
/// Probability that a move is a swap.
pub const SWAP_PROBABILITY: f64 = 0.5;
/// Hue range (inclusive) of the hard-to-name olive zone.
pub const CONFUSABLE_HUE: (f64, f64) = (85.0, 114.0);
/// Lightness range (inclusive) of the hard-to-name olive zone.
pub const CONFUSABLE_LIGHTNESS: (f64, f64) = (35.0, 75.0);

/// What a call to [`perturb`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Two slots exchanged colors
    Swap(usize, usize),
    /// One slot was jittered, followed by `repairs` re-jitters
    Nudge {
        /// The jittered slot
        slot: usize,
        /// Repair attempts spent
        repairs: usize,
    },
    /// The palette was empty
    Noop,
}

/// Draw `size` colors with independent uniform channels.
pub fn random_palette<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Srgb> {
    (0..size)
        .map(|_| Srgb::from_u8(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

/// Apply one random move to `palette` in place.
///
/// Palettes with fewer than two colors always nudge.
pub fn perturb<R: Rng + ?Sized>(palette: &mut [Srgb], scope: &ColorScope, rng: &mut R) -> Move {
    let n = palette.len();
    if n == 0 {
        return Move::Noop;
    }
    if n >= 2 && rng.gen_bool(SWAP_PROBABILITY) {
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n - 1);
        if b >= a {
            b += 1;
        }
        palette.swap(a, b);
        return Move::Swap(a, b);
    }

    let slot = rng.gen_range(0..n);
    palette[slot] = scope.constrain(jitter(palette[slot], rng));
    let repairs = repair(palette, scope, rng);
    Move::Nudge { slot, repairs }
}

/// Re-jitter colors until every pair is at least
/// [`DISCRIMINABILITY_THRESHOLD`] apart or [`REPAIR_ATTEMPTS`] is spent.
///
/// Each attempt moves the second color of the first violating pair.
/// Returns the number of attempts made.
pub fn repair<R: Rng + ?Sized>(palette: &mut [Srgb], scope: &ColorScope, rng: &mut R) -> usize {
    let mut attempts = 0;
    while attempts < REPAIR_ATTEMPTS {
        let Some(slot) = first_violation(palette) else {
            break;
        };
        attempts += 1;
        palette[slot] = rejitter(palette[slot], scope, rng);
    }
    if attempts == REPAIR_ATTEMPTS && first_violation(palette).is_some() {
        tracing::trace!("Repair gave up with a pair still under threshold");
    }
    attempts
}

/// The second slot `j` of the first pair `(i, j)`, scanning `i` then `j`
/// upward, whose distance is below [`DISCRIMINABILITY_THRESHOLD`].
pub fn first_violation(palette: &[Srgb]) -> Option<usize> {
    let labs: Vec<Lab> = palette.iter().map(|&c| Lab::from(c)).collect();
    for i in 0..labs.len() {
        for j in (i + 1)..labs.len() {
            if labs[i].difference(labs[j]) < DISCRIMINABILITY_THRESHOLD {
                return Some(j);
            }
        }
    }
    None
}

/// Offset each channel by a uniform integer in `[-DISTURB_STEP, DISTURB_STEP]`.
fn jitter<R: Rng + ?Sized>(color: Srgb, rng: &mut R) -> Srgb {
    let mut step = || f64::from(rng.gen_range(-DISTURB_STEP..=DISTURB_STEP));
    let (dr, dg, db) = (step(), step(), step());
    color.offset(dr, dg, db)
}

/// Push a hue inside the olive zone to the nearer side just outside it.
fn escape_confusable_zone(mut hcl: Hcl) -> Hcl {
    let (low, high) = CONFUSABLE_HUE;
    let in_zone = (low..=high).contains(&hcl.h)
        && (CONFUSABLE_LIGHTNESS.0..=CONFUSABLE_LIGHTNESS.1).contains(&hcl.l);
    if in_zone {
        hcl.h = if (hcl.h - low).abs() > (hcl.h - high).abs() {
            high + 1.0
        } else {
            low - 1.0
        };
    }
    hcl
}

/// Jitter used by the repair pass.
fn rejitter<R: Rng + ?Sized>(color: Srgb, scope: &ColorScope, rng: &mut R) -> Srgb {
    let hcl = escape_confusable_zone(Hcl::from(jitter(color, rng)));
    scope.constrain_hcl(hcl)
}
