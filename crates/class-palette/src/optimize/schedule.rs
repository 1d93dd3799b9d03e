//! Annealing schedule and color constraints.

use crate::color::{Hcl, Lab, Srgb};

/// Starting temperature.
pub const INITIAL_TEMPERATURE: f64 = 100_000.0;
/// Multiplicative cooling per iteration.
pub const COOLING_FACTOR: f64 = 0.99;
/// The run stops once the temperature drops to this value.
pub const MIN_TEMPERATURE: f64 = 0.001;
/// Hard upper bound on iterations.
pub const MAX_ITERATIONS: u64 = 10_000_000;
/// Bisection steps when pulling chroma back into the sRGB gamut.
const GAMUT_STEPS: usize = 24;

/// Simulated annealing schedule.
///
/// One candidate is tried per temperature step. The run ends when the
/// temperature is no longer above `min_temperature` or after
/// `max_iterations` candidates, whichever comes first.
///
/// # Example
///
/// ```
/// use class_palette::AnnealingSchedule;
///
/// let quick = AnnealingSchedule::new().initial_temperature(10.0).cooling_factor(0.9);
/// assert!(quick.step_count() < AnnealingSchedule::default().step_count());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingSchedule {
    /// Default: `100000`
    pub initial_temperature: f64,
    /// Default: `0.99`
    pub cooling_factor: f64,
    /// Default: `0.001`
    pub min_temperature: f64,
    /// Default: `10_000_000`
    pub max_iterations: u64,
}

impl Default for AnnealingSchedule {
    fn default() -> Self {
        Self {
            initial_temperature: INITIAL_TEMPERATURE,
            cooling_factor: COOLING_FACTOR,
            min_temperature: MIN_TEMPERATURE,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl AnnealingSchedule {
    /// The default schedule.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting temperature.
    #[inline]
    pub fn initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Set the per-iteration cooling factor.
    #[inline]
    pub fn cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    /// Set the temperature floor.
    #[inline]
    pub fn min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    /// Set the iteration cap.
    #[inline]
    pub fn max_iterations(mut self, n: u64) -> Self {
        self.max_iterations = n;
        self
    }

    /// Number of iterations a run performs.
    pub fn step_count(&self) -> u64 {
        let mut t = self.initial_temperature;
        let mut steps = 0;
        while t > self.min_temperature && steps < self.max_iterations {
            steps += 1;
            t *= self.cooling_factor;
        }
        steps
    }
}

/// Hue and lightness ranges a perturbed color is clamped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScope {
    /// Hue range in degrees. Default: `[0, 360]`
    pub hue: (f64, f64),
    /// Lightness range. Default: `[35, 95]`
    pub lightness: (f64, f64),
}

impl Default for ColorScope {
    fn default() -> Self {
        Self {
            hue: (0.0, 360.0),
            lightness: (35.0, 95.0),
        }
    }
}

impl ColorScope {
    /// Create a scope from hue and lightness ranges.
    #[inline]
    pub fn new(hue: (f64, f64), lightness: (f64, f64)) -> Self {
        Self { hue, lightness }
    }

    /// Clamp `hcl` into the scope and convert to sRGB.
    ///
    /// Out-of-gamut colors lose chroma, not hue or lightness, so the
    /// result stays inside the scope.
    pub fn constrain_hcl(&self, hcl: Hcl) -> Srgb {
        let hcl = hcl.constrain(self.hue, self.lightness);
        if Lab::from(hcl).in_srgb_gamut() {
            return Srgb::from(hcl);
        }
        let (mut low, mut high) = (0.0, hcl.c);
        for _ in 0..GAMUT_STEPS {
            let mid = 0.5 * (low + high);
            if Lab::from(Hcl { c: mid, ..hcl }).in_srgb_gamut() {
                low = mid;
            } else {
                high = mid;
            }
        }
        Srgb::from(Hcl { c: low, ..hcl })
    }

    /// Clamp `color` into the scope.
    #[inline]
    pub fn constrain(&self, color: Srgb) -> Srgb {
        self.constrain_hcl(Hcl::from(color))
    }
}
