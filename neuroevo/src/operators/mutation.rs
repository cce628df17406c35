use crate::rng::gen_chance;
use crate::BitString;

use rand::Rng;

/// Single-event bit-flip mutation.
///
/// With chance `probability` the sequence is returned
/// unchanged; otherwise one uniformly chosen bit is
/// flipped. No more than one bit ever changes.
///
/// # Note
/// `probability` is the chance of *keeping* the sequence
/// intact: `1.0` disables mutation entirely, while `0.0`
/// guarantees a flip on every call.
///
/// # Examples
/// ```
/// use neuroevo::{operators::mutate, seeded_rng, BitString};
///
/// let mut rng = seeded_rng(0);
/// let bits = BitString::zeroed(32);
///
/// let untouched = mutate(bits.clone(), 1.0, &mut rng);
/// assert_eq!(untouched, bits);
///
/// let flipped = mutate(bits.clone(), 0.0, &mut rng);
/// assert_eq!(flipped.hamming_distance(&bits), 1);
/// ```
pub fn mutate<R: Rng + ?Sized>(mut bits: BitString, probability: f32, rng: &mut R) -> BitString {
    // `probability` is the chance of keeping `bits` as they are.
    if bits.is_empty() || gen_chance(rng, probability) {
        return bits;
    }
    let index = rng.gen_range(0..bits.len());
    bits.flip(index);
    bits
}
