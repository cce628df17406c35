use std::error::Error;
use std::fmt;

/// An error type indicating a network was
/// given data of the wrong shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkError {
    /// The number of inputs fed to the network
    /// differs from its input layer size.
    DimensionMismatch { expected: usize, found: usize },
    /// The number of weights supplied for a layer
    /// differs from what the topology requires.
    WeightCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::DimensionMismatch { expected, found } => write!(
                f,
                "network expected {} inputs, but was fed {}",
                expected, found
            ),
            NetworkError::WeightCountMismatch { expected, found } => write!(
                f,
                "layer requires {} weights, but {} were supplied",
                expected, found
            ),
        }
    }
}

impl Error for NetworkError {}
