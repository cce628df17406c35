use super::SelectionError;

use rand::Rng;

/// Anything carrying a fitness score that
/// selection can be run over.
pub trait Candidate {
    /// The candidate's fitness. Should be ≥0.
    fn fitness(&self) -> f32;
}

impl Candidate for f32 {
    fn fitness(&self) -> f32 {
        *self
    }
}

impl<C: Candidate + ?Sized> Candidate for &C {
    fn fitness(&self) -> f32 {
        (**self).fitness()
    }
}

/// A candidate's slot on the roulette wheel.
///
/// Entries are derived fresh for every selection
/// and never stored with the candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouletteEntry {
    /// Index of the candidate in the input slice.
    pub index: usize,
    pub fitness: f32,
    /// Share of the candidates' total fitness.
    pub normalized_fitness: f32,
    /// Running sum of `normalized_fitness` over all
    /// entries up to and including this one.
    pub accumulated_normalized_fitness: f32,
}

/// Builds the roulette wheel for `candidates`: one entry per
/// candidate, sorted by decreasing fitness (ties keep their
/// input order), with accumulated normalized fitness rising
/// towards 1 along the wheel.
///
/// # Errors
/// Returns [`SelectionError::DegenerateFitness`] if the fitness
/// sum is not positive (this includes an empty slice).
///
/// # Examples
/// ```
/// use neuroevo::operators::roulette_wheel;
///
/// let wheel = roulette_wheel(&[1.0f32, 3.0]).unwrap();
/// assert_eq!(wheel[0].index, 1);
/// assert_eq!(wheel[0].accumulated_normalized_fitness, 0.75);
/// assert_eq!(wheel[1].accumulated_normalized_fitness, 1.0);
/// ```
pub fn roulette_wheel<C: Candidate>(candidates: &[C]) -> Result<Vec<RouletteEntry>, SelectionError> {
    let total_fitness: f32 = candidates.iter().map(Candidate::fitness).sum();
    if !(total_fitness > 0.0) {
        return Err(SelectionError::DegenerateFitness);
    }

    let mut wheel: Vec<RouletteEntry> = candidates
        .iter()
        .enumerate()
        .map(|(index, c)| RouletteEntry {
            index,
            fitness: c.fitness(),
            normalized_fitness: c.fitness() / total_fitness,
            accumulated_normalized_fitness: 0.0,
        })
        .collect();
    wheel.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

    let mut accumulated = 0.0;
    for entry in &mut wheel {
        accumulated += entry.normalized_fitness;
        entry.accumulated_normalized_fitness = accumulated;
    }
    Ok(wheel)
}

/// Picks one candidate with probability proportional
/// to its fitness, returning its index.
///
/// # Errors
/// Returns an error if `candidates` is empty or
/// its fitness sum is not positive.
///
/// # Examples
/// ```
/// use neuroevo::{operators::select_winner, seeded_rng};
///
/// let mut rng = seeded_rng(3);
/// // A zero-fitness candidate is never picked.
/// for _ in 0..100 {
///     assert_eq!(select_winner(&[0.0f32, 2.0, 0.0], &mut rng), Ok(1));
/// }
/// ```
pub fn select_winner<C, R>(candidates: &[C], rng: &mut R) -> Result<usize, SelectionError>
where
    C: Candidate,
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Err(SelectionError::InsufficientCandidates {
            required: 1,
            found: 0,
        });
    }
    let wheel = roulette_wheel(candidates)?;
    Ok(spin(&wheel, rng.gen::<f32>()))
}

/// Returns the entry with the smallest accumulated value
/// that still reaches `r`.
fn spin(wheel: &[RouletteEntry], r: f32) -> usize {
    wheel
        .iter()
        .find(|e| e.accumulated_normalized_fitness >= r)
        // Rounding can leave the final sum just short of `r`.
        .or_else(|| wheel.iter().rev().find(|e| e.normalized_fitness > 0.0))
        .map(|e| e.index)
        .unwrap_or(0)
}

/// Selects two distinct parents by fitness-proportionate
/// selection. The first parent is removed from the pool
/// before the second is drawn. Returns the parents'
/// indices in `candidates`, first parent first.
///
/// # Errors
/// Returns [`SelectionError::InsufficientCandidates`] if fewer
/// than two candidates are given, and
/// [`SelectionError::DegenerateFitness`] if either draw has no
/// positive fitness to work with.
///
/// # Examples
/// ```
/// use neuroevo::{operators::select_parents, seeded_rng};
///
/// let mut rng = seeded_rng(11);
/// let (first, second) = select_parents(&[10.0f32, 5.0, 3.0, 2.0], &mut rng).unwrap();
/// assert_ne!(first, second);
/// ```
pub fn select_parents<C, R>(candidates: &[C], rng: &mut R) -> Result<(usize, usize), SelectionError>
where
    C: Candidate,
    R: Rng + ?Sized,
{
    if candidates.len() < 2 {
        return Err(SelectionError::InsufficientCandidates {
            required: 2,
            found: candidates.len(),
        });
    }

    let first = select_winner(candidates, rng)?;
    let remaining: Vec<&C> = candidates
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != first)
        .map(|(_, c)| c)
        .collect();
    let second = select_winner(&remaining, rng)?;
    // Map back past the removed slot.
    let second = if second >= first { second + 1 } else { second };

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeded_rng;

    #[test]
    fn wheel_accumulates_in_decreasing_fitness_order() {
        let wheel = roulette_wheel(&[2.0f32, 10.0, 3.0, 5.0]).unwrap();
        assert_eq!(
            wheel.iter().map(|e| e.index).collect::<Vec<_>>(),
            [1, 3, 2, 0]
        );
        let accumulated: Vec<f32> = wheel
            .iter()
            .map(|e| e.accumulated_normalized_fitness)
            .collect();
        let expected = [0.5f32, 0.75, 0.9, 1.0];
        for (a, e) in accumulated.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{:?}", accumulated);
        }
    }

    #[test]
    fn wheel_ties_keep_input_order() {
        let wheel = roulette_wheel(&[1.0f32, 4.0, 1.0, 4.0]).unwrap();
        assert_eq!(
            wheel.iter().map(|e| e.index).collect::<Vec<_>>(),
            [1, 3, 0, 2]
        );
    }

    #[test]
    fn wheel_rejects_zero_total() {
        assert_eq!(
            roulette_wheel(&[0.0f32, 0.0]),
            Err(SelectionError::DegenerateFitness)
        );
        assert_eq!(
            roulette_wheel::<f32>(&[]),
            Err(SelectionError::DegenerateFitness)
        );
    }

    #[test]
    fn spin_picks_smallest_reaching_accumulation() {
        let wheel = roulette_wheel(&[10.0f32, 5.0, 3.0, 2.0]).unwrap();
        // Accumulated: 0.5, 0.75, 0.9, 1.0
        assert_eq!(spin(&wheel, 0.0), 0);
        assert_eq!(spin(&wheel, 0.5), 0);
        assert_eq!(spin(&wheel, 0.6), 1);
        assert_eq!(spin(&wheel, 0.8), 2);
        assert_eq!(spin(&wheel, 0.95), 3);
    }

    #[test]
    fn spin_past_rounded_total_skips_zero_fitness() {
        let wheel = roulette_wheel(&[1.0f32, 0.0]).unwrap();
        assert_eq!(spin(&wheel, 1.5), 0);
    }

    #[test]
    fn select_winner_is_reproducible() {
        let fitnesses = [10.0f32, 5.0, 3.0, 2.0];
        let draw = |seed| {
            let mut rng = seeded_rng(seed);
            (0..20)
                .map(|_| select_winner(&fitnesses, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        for seed in 0..10 {
            assert_eq!(draw(seed), draw(seed));
        }
    }

    #[test]
    fn select_winner_is_fitness_proportionate() {
        const TRIALS: usize = 100_000;
        let mut rng = seeded_rng(42);
        let fitter = (0..TRIALS)
            .filter(|_| select_winner(&[100.0f32, 1.0], &mut rng).unwrap() == 0)
            .count();
        let frequency = fitter as f64 / TRIALS as f64;
        assert!(
            (frequency - 100.0 / 101.0).abs() < 0.005,
            "frequency {}",
            frequency
        );
    }

    #[test]
    fn select_winner_on_empty() {
        let mut rng = seeded_rng(0);
        assert_eq!(
            select_winner::<f32, _>(&[], &mut rng),
            Err(SelectionError::InsufficientCandidates {
                required: 1,
                found: 0
            })
        );
    }

    #[test]
    fn select_parents_are_distinct() {
        let mut rng = seeded_rng(5);
        for _ in 0..1000 {
            let (a, b) = select_parents(&[1.0f32, 1.0, 1.0], &mut rng).unwrap();
            assert_ne!(a, b);
            assert!(a < 3 && b < 3);
        }
    }

    #[test]
    fn select_parents_of_two_takes_both() {
        let mut rng = seeded_rng(9);
        for _ in 0..100 {
            let (a, b) = select_parents(&[100.0f32, 1.0], &mut rng).unwrap();
            assert_eq!(a + b, 1);
        }
    }

    #[test]
    fn select_parents_requires_two() {
        let mut rng = seeded_rng(0);
        assert_eq!(
            select_parents(&[3.0f32], &mut rng),
            Err(SelectionError::InsufficientCandidates {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn select_parents_degenerate_remainder() {
        let mut rng = seeded_rng(0);
        assert_eq!(
            select_parents(&[5.0f32, 0.0], &mut rng),
            Err(SelectionError::DegenerateFitness)
        );
    }
}
