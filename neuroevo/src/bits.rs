//! Flat bit sequences used as the exchange format between
//! genomes and the genetic operators.
//!
//! Numeric fields are written most significant bit first,
//! so that a field's bit order is the same as in its
//! IEEE-754 representation.

use serde::{Deserialize, Serialize};

use std::fmt;

/// An ordered sequence of bits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Returns an empty bit string.
    pub fn new() -> BitString {
        BitString { bits: vec![] }
    }

    /// Returns an empty bit string with room for
    /// `capacity` bits.
    pub fn with_capacity(capacity: usize) -> BitString {
        BitString {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Returns a bit string of `len` unset bits.
    pub fn zeroed(len: usize) -> BitString {
        BitString {
            bits: vec![false; len],
        }
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns whether the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Sets the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, bit: bool) {
        self.bits[index] = bit;
    }

    /// Inverts the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::BitString;
    ///
    /// let mut bits = BitString::zeroed(3);
    /// bits.flip(1);
    /// assert_eq!(bits.to_string(), "010");
    /// ```
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    /// Appends a single bit.
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the 32 bits of `value`'s IEEE-754
    /// single precision representation.
    pub fn push_f32(&mut self, value: f32) {
        self.push_word(u64::from(value.to_bits()), 32);
    }

    /// Appends the 64 bits of `value`'s IEEE-754
    /// double precision representation.
    pub fn push_f64(&mut self, value: f64) {
        self.push_word(value.to_bits(), 64);
    }

    fn push_word(&mut self, word: u64, width: u32) {
        self.bits
            .extend((0..width).rev().map(|shift| (word >> shift) & 1 == 1));
    }

    /// Returns a cursor reading fields from the
    /// start of the sequence.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::BitString;
    ///
    /// let mut bits = BitString::new();
    /// bits.push_f32(1.5);
    /// bits.push_f64(-0.25);
    ///
    /// let mut reader = bits.reader();
    /// assert_eq!(reader.read_f32(), Some(1.5));
    /// assert_eq!(reader.read_f64(), Some(-0.25));
    /// assert_eq!(reader.read_f32(), None);
    /// ```
    pub fn reader(&self) -> BitReader<'_> {
        BitReader {
            bits: &self.bits,
            position: 0,
        }
    }

    /// Iterates over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Number of positions at which the two sequences differ.
    /// Bits past the end of the shorter sequence all count
    /// as differing.
    ///
    /// # Examples
    /// ```
    /// use neuroevo::BitString;
    ///
    /// let a: BitString = "0110".parse().unwrap();
    /// let b: BitString = "0011".parse().unwrap();
    /// assert_eq!(a.hamming_distance(&b), 2);
    /// ```
    pub fn hamming_distance(&self, other: &BitString) -> usize {
        let common = self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count();
        common + self.len().abs_diff(other.len())
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> BitString {
        BitString { bits }
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> BitString {
        BitString {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Error returned when parsing a bit string from
/// text containing characters other than `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBitStringError(pub char);

impl fmt::Display for ParseBitStringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit character {:?}", self.0)
    }
}

impl std::error::Error for ParseBitStringError {}

impl std::str::FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> Result<BitString, ParseBitStringError> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(ParseBitStringError(other)),
            })
            .collect()
    }
}

/// Sequential field reader over a [`BitString`].
#[derive(Debug)]
pub struct BitReader<'a> {
    bits: &'a [bool],
    position: usize,
}

impl BitReader<'_> {
    /// Reads a 32-bit float, or `None` if fewer
    /// than 32 bits remain.
    pub fn read_f32(&mut self) -> Option<f32> {
        self.read_word(32).map(|w| f32::from_bits(w as u32))
    }

    /// Reads a 64-bit float, or `None` if fewer
    /// than 64 bits remain.
    pub fn read_f64(&mut self) -> Option<f64> {
        self.read_word(64).map(f64::from_bits)
    }

    /// Number of bits not yet read.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    fn read_word(&mut self, width: usize) -> Option<u64> {
        let field = self.bits.get(self.position..self.position + width)?;
        self.position += width;
        Some(field.iter().fold(0, |word, bit| (word << 1) | u64::from(*bit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_f32_is_msb_first() {
        let mut bits = BitString::new();
        bits.push_f32(1.0);
        // 1.0f32 == 0x3F80_0000
        assert_eq!(bits.to_string(), "00111111100000000000000000000000");
    }

    #[test]
    fn push_f64_is_msb_first() {
        let mut bits = BitString::new();
        bits.push_f64(-2.0);
        // -2.0f64 == 0xC000_0000_0000_0000
        assert_eq!(bits.len(), 64);
        assert_eq!(bits.get(0), Some(true));
        assert_eq!(bits.get(1), Some(true));
        assert!(bits.iter().skip(2).all(|b| !b));
    }

    #[test]
    fn reader_preserves_special_values() {
        let mut bits = BitString::new();
        bits.push_f64(f64::NEG_INFINITY);
        bits.push_f32(-0.0);
        bits.push_f64(f64::MIN_POSITIVE);

        let mut reader = bits.reader();
        assert_eq!(reader.read_f64(), Some(f64::NEG_INFINITY));
        let negative_zero = reader.read_f32().unwrap();
        assert_eq!(negative_zero.to_bits(), (-0.0f32).to_bits());
        assert_eq!(reader.read_f64(), Some(f64::MIN_POSITIVE));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reader_stops_on_short_field() {
        let bits = BitString::zeroed(40);
        let mut reader = bits.reader();
        assert_eq!(reader.read_f32(), Some(0.0));
        assert_eq!(reader.read_f32(), None);
        assert_eq!(reader.remaining(), 8);
    }

    #[test]
    fn parse_rejects_non_bits() {
        assert_eq!(
            "01x1".parse::<BitString>(),
            Err(ParseBitStringError('x'))
        );
        assert_eq!("".parse::<BitString>(), Ok(BitString::new()));
    }

    #[test]
    fn hamming_distance_counts_length_difference() {
        let a: BitString = "101".parse().unwrap();
        let b: BitString = "10111".parse().unwrap();
        assert_eq!(a.hamming_distance(&b), 2);
        assert_eq!(b.hamming_distance(&a), 2);
        assert_eq!(a.hamming_distance(&a), 0);
    }

    #[test]
    fn serde() {
        let bits: BitString = "1100".parse().unwrap();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(serde_json::from_str::<BitString>(&json).unwrap(), bits);
    }
}
