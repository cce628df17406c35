use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pseudo-random generator shared by every stochastic
/// step of a run: weight initialization, selection,
/// crossover, mutation and the habitat itself.
///
/// It is constructed once per run and handed out by
/// mutable reference, so that a whole run can be
/// reproduced from its seed.
pub type EvolutionRng = ChaCha8Rng;

/// Returns a run generator seeded with `seed`.
///
/// # Examples
/// ```
/// use neuroevo::seeded_rng;
/// use rand::Rng;
///
/// let mut a = seeded_rng(7);
/// let mut b = seeded_rng(7);
/// assert_eq!(a.gen::<u64>(), b.gen::<u64>());
/// ```
pub fn seeded_rng(seed: u64) -> EvolutionRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Returns `true` with probability `chance`.
///
/// Values outside [0.0, 1.0] saturate: `chance <= 0`
/// never succeeds, `chance >= 1` always does.
pub(crate) fn gen_chance<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.gen::<f32>() < chance
}
