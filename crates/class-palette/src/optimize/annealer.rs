//! Simulated annealing over palettes.

use rand::Rng;

use super::perturb::{perturb, random_palette};
use super::schedule::{AnnealingSchedule, ColorScope};
use crate::color::Srgb;
use crate::evaluate::PaletteEvaluator;

/// A palette together with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPalette {
    /// One color per class
    pub palette: Vec<Srgb>,
    /// Evaluator score; higher is better
    pub score: f64,
}

/// Progress report for one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealStep {
    /// 1-based iteration number
    pub iteration: u64,
    /// Temperature the candidate was judged at
    pub temperature: f64,
    /// Candidate score
    pub candidate_score: f64,
    /// Score of the current palette after the decision
    pub current_score: f64,
    /// Best score so far
    pub best_score: f64,
    /// Whether the candidate replaced the current palette
    pub accepted: bool,
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnnealStats {
    /// Candidates evaluated
    pub iterations: u64,
    /// Candidates accepted
    pub accepted: u64,
    /// Times the best palette improved
    pub improvements: u64,
    /// Temperature when the loop ended
    pub final_temperature: f64,
}

/// Outcome of [`PaletteOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Best palette seen during the run
    pub best: ScoredPalette,
    /// Run counters
    pub stats: AnnealStats,
}

/// Simulated annealing driver.
///
/// Starts from a uniformly random palette, proposes one perturbed copy of
/// the current palette per temperature step and keeps it by the
/// Metropolis rule. The best palette seen is returned as an independent
/// copy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaletteOptimizer {
    schedule: AnnealingSchedule,
    scope: ColorScope,
}

impl PaletteOptimizer {
    /// Create an optimizer.
    pub fn new(schedule: AnnealingSchedule, scope: ColorScope) -> Self {
        Self { schedule, scope }
    }

    /// The schedule in use.
    #[inline]
    pub fn schedule(&self) -> &AnnealingSchedule {
        &self.schedule
    }

    /// The color scope in use.
    #[inline]
    pub fn scope(&self) -> &ColorScope {
        &self.scope
    }

    /// Find a good palette of `size` colors.
    pub fn optimize<R: Rng + ?Sized>(
        &self,
        size: usize,
        evaluator: &mut PaletteEvaluator<'_>,
        rng: &mut R,
    ) -> OptimizationResult {
        self.optimize_with(size, evaluator, rng, |_| {})
    }

    /// Like [`optimize`](Self::optimize), calling `on_step` after every
    /// iteration.
    pub fn optimize_with<R, F>(
        &self,
        size: usize,
        evaluator: &mut PaletteEvaluator<'_>,
        rng: &mut R,
        mut on_step: F,
    ) -> OptimizationResult
    where
        R: Rng + ?Sized,
        F: FnMut(&AnnealStep),
    {
        let schedule = &self.schedule;
        if size == 0 {
            return OptimizationResult {
                best: ScoredPalette {
                    palette: Vec::new(),
                    score: 0.0,
                },
                stats: AnnealStats {
                    final_temperature: schedule.initial_temperature,
                    ..AnnealStats::default()
                },
            };
        }

        evaluator.reset_reference();
        let palette = random_palette(size, rng);
        let mut current = ScoredPalette {
            score: evaluator.score(&palette),
            palette,
        };
        let mut best = current.clone();
        let mut stats = AnnealStats::default();
        let mut temperature = schedule.initial_temperature;

        while temperature > schedule.min_temperature && stats.iterations < schedule.max_iterations
        {
            stats.iterations += 1;

            let mut candidate = current.palette.clone();
            perturb(&mut candidate, &self.scope, rng);
            let candidate_score = evaluator.score(&candidate);

            let accepted = metropolis_accept(current.score - candidate_score, temperature, rng);
            if accepted {
                stats.accepted += 1;
                current = ScoredPalette {
                    palette: candidate,
                    score: candidate_score,
                };
                if current.score > best.score {
                    best = current.clone();
                    stats.improvements += 1;
                }
            }

            on_step(&AnnealStep {
                iteration: stats.iterations,
                temperature,
                candidate_score,
                current_score: current.score,
                best_score: best.score,
                accepted,
            });

            temperature *= schedule.cooling_factor;
        }
        stats.final_temperature = temperature;

        tracing::debug!(
            colors = size,
            iterations = stats.iterations,
            accepted = stats.accepted,
            improvements = stats.improvements,
            best_score = best.score,
            "Annealing finished"
        );

        OptimizationResult { best, stats }
    }
}

/// Metropolis rule: a candidate that scores `delta` lower than the current
/// palette is kept with probability `exp(-delta / temperature)`; one that
/// scores no lower is always kept.
fn metropolis_accept<R: Rng + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    delta <= 0.0 || (delta > 0.0 && rng.gen::<f64>() <= (-delta / temperature).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyTable;
    use crate::naming::ColorNameModel;
    use crate::optimize::schedule::{INITIAL_TEMPERATURE, MIN_TEMPERATURE};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table() -> AdjacencyTable {
        let mut t = AdjacencyTable::new();
        t.insert(0, 1, 1.0);
        t.insert(1, 2, 0.5);
        t
    }

    #[test]
    fn test_iteration_cap_stops_run() {
        let (t, names) = (table(), ColorNameModel::empty());
        let mut eval =
            PaletteEvaluator::new(&t, &names, Srgb::from_u8(255, 255, 255), [1.0; 3].into());
        let schedule = AnnealingSchedule::new().cooling_factor(1.0).max_iterations(40);
        let optimizer = PaletteOptimizer::new(schedule, ColorScope::default());

        let result = optimizer.optimize(3, &mut eval, &mut StdRng::seed_from_u64(2));
        assert_eq!(result.stats.iterations, 40);
        assert_eq!(result.best.palette.len(), 3);
    }

    #[test]
    fn test_empty_palette_returns_immediately() {
        let (t, names) = (AdjacencyTable::new(), ColorNameModel::empty());
        let mut eval =
            PaletteEvaluator::new(&t, &names, Srgb::from_u8(255, 255, 255), [1.0; 3].into());
        let mut calls = 0;
        let result = PaletteOptimizer::default().optimize_with(
            0,
            &mut eval,
            &mut StdRng::seed_from_u64(0),
            |_| calls += 1,
        );
        assert_eq!(calls, 0);
        assert!(result.best.palette.is_empty());
        assert_eq!(result.stats.iterations, 0);
    }

    #[test]
    fn test_steps_report_consistent_state() {
        let (t, names) = (table(), ColorNameModel::empty());
        let mut eval =
            PaletteEvaluator::new(&t, &names, Srgb::from_u8(255, 255, 255), [1.0; 3].into());
        let schedule = AnnealingSchedule::new().initial_temperature(1.0).cooling_factor(0.9);
        let optimizer = PaletteOptimizer::new(schedule, ColorScope::default());

        let mut steps = Vec::new();
        let result =
            optimizer.optimize_with(3, &mut eval, &mut StdRng::seed_from_u64(9), |s| steps.push(*s));

        assert_eq!(steps.len() as u64, result.stats.iterations);
        assert_eq!(steps.len() as u64, schedule.step_count());
        for (k, step) in steps.iter().enumerate() {
            assert_eq!(step.iteration, k as u64 + 1);
            assert!(step.best_score >= step.current_score);
            if step.accepted {
                assert_eq!(step.current_score, step.candidate_score);
            }
        }
        let last = steps.last().unwrap();
        assert_eq!(last.best_score, result.best.score);
        assert_eq!(
            steps.iter().filter(|s| s.accepted).count() as u64,
            result.stats.accepted
        );
    }

    fn acceptances(delta: f64, temperature: f64, seed: u64) -> usize {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..1000)
            .filter(|_| metropolis_accept(delta, temperature, &mut rng))
            .count()
    }

    #[test]
    fn test_improvements_always_accepted() {
        assert_eq!(acceptances(-0.5, MIN_TEMPERATURE, 1), 1000);
        assert_eq!(acceptances(0.0, MIN_TEMPERATURE, 2), 1000);
    }

    #[test]
    fn test_worse_candidates_follow_temperature() {
        // exp(-1e-5): practically always
        assert!(acceptances(1.0, INITIAL_TEMPERATURE, 3) > 990);
        // exp(-1): about 368 in 1000
        let warm = acceptances(1.0, 1.0, 4);
        assert!((300..440).contains(&warm), "accepted {}", warm);
        // exp(-1000) underflows to 0
        assert_eq!(acceptances(1.0, MIN_TEMPERATURE, 5), 0);
    }

    #[test]
    fn test_hot_run_accepts_worse_palettes() {
        let (t, names) = (table(), ColorNameModel::empty());
        let mut eval =
            PaletteEvaluator::new(&t, &names, Srgb::from_u8(255, 255, 255), [1.0; 3].into());
        let schedule = AnnealingSchedule::new().cooling_factor(1.0).max_iterations(200);
        let optimizer = PaletteOptimizer::new(schedule, ColorScope::default());

        let mut steps = Vec::new();
        optimizer.optimize_with(3, &mut eval, &mut StdRng::seed_from_u64(12), |s| steps.push(*s));

        let downhill = steps
            .windows(2)
            .filter(|w| w[1].accepted && w[1].candidate_score < w[0].current_score)
            .count();
        assert!(downhill > 0);
    }
}
