use std::error::Error;
use std::fmt;

/// Error returned when decoding a bit sequence whose
/// length does not match the genome's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomeLengthMismatch {
    /// Length required by the genome's layout.
    pub expected: usize,
    /// Length of the offending sequence.
    pub found: usize,
}

impl fmt::Display for GenomeLengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genome decode expected {} bits, found {}",
            self.expected, self.found
        )
    }
}

impl Error for GenomeLengthMismatch {}
