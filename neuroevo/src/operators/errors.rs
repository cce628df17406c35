use std::error::Error;
use std::fmt;

/// An error type indicating a failure to
/// select parents from a set of candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Fewer candidates than required were supplied.
    InsufficientCandidates { required: usize, found: usize },
    /// The candidates' fitness sum is not positive, so no
    /// selection probabilities can be derived from it.
    /// Callers are expected to fall back to uniform selection.
    DegenerateFitness,
}

/// An error type indicating a failure to
/// cross over two bit sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverError {
    /// The parents have different lengths.
    LengthMismatch(usize, usize),
    /// The cut index lies past the end of the parents.
    CutOutOfRange { cut: usize, length: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCandidates { required, found } => write!(
                f,
                "selection requires at least {} candidates, found {}",
                required, found
            ),
            Self::DegenerateFitness => {
                write!(f, "attempted selection on candidates with no positive fitness")
            }
        }
    }
}

impl fmt::Display for CrossoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch(first, second) => write!(
                f,
                "crossover between parents of different lengths {} and {}",
                first, second
            ),
            Self::CutOutOfRange { cut, length } => write!(
                f,
                "crossover cut at {} on parents of length {}",
                cut, length
            ),
        }
    }
}

impl Error for SelectionError {}
impl Error for CrossoverError {}
