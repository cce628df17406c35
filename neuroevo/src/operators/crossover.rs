use super::CrossoverError;
use crate::BitString;

use rand::Rng;

/// Single-point crossover: picks a uniformly random cut
/// `k` in `[0, length)` and returns the child made of
/// `first[..k]` followed by `second[k..]`.
///
/// Crossing over two empty sequences yields an empty child.
///
/// # Errors
/// Returns [`CrossoverError::LengthMismatch`] if the parents
/// have different lengths.
///
/// # Examples
/// ```
/// use neuroevo::{operators::crossover, seeded_rng, BitString};
///
/// let first = BitString::zeroed(16);
/// let second: BitString = std::iter::repeat(true).take(16).collect();
/// let child = crossover(&first, &second, &mut seeded_rng(1)).unwrap();
///
/// // Some prefix of zeros, followed only by ones.
/// let cut = child.iter().position(|b| b).unwrap();
/// assert!(child.iter().skip(cut).all(|b| b));
/// ```
pub fn crossover<R: Rng + ?Sized>(
    first: &BitString,
    second: &BitString,
    rng: &mut R,
) -> Result<BitString, CrossoverError> {
    check_lengths(first, second)?;
    if first.is_empty() {
        return Ok(BitString::new());
    }
    let cut = rng.gen_range(0..first.len());
    crossover_at(first, second, cut)
}

/// Single-point crossover at a fixed `cut`, which may
/// range over `0..=length`. A cut of 0 copies `second`
/// entirely, a cut of `length` copies `first`.
///
/// # Errors
/// Returns an error if the parents have different lengths
/// or `cut` is past their end.
pub fn crossover_at(
    first: &BitString,
    second: &BitString,
    cut: usize,
) -> Result<BitString, CrossoverError> {
    check_lengths(first, second)?;
    if cut > first.len() {
        return Err(CrossoverError::CutOutOfRange {
            cut,
            length: first.len(),
        });
    }
    Ok(first.iter().take(cut).chain(second.iter().skip(cut)).collect())
}

fn check_lengths(first: &BitString, second: &BitString) -> Result<(), CrossoverError> {
    if first.len() != second.len() {
        Err(CrossoverError::LengthMismatch(first.len(), second.len()))
    } else {
        Ok(())
    }
}
