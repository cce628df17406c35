use std::error::Error;
use std::fmt;

/// An error type indicating a population
/// configuration that cannot be evolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopulationError {
    /// Fewer than two agents per generation.
    Undersized(usize),
    /// The epoch duration is not a positive, finite time.
    InvalidEpochDuration(f32),
    /// A simulation step that is not a positive, finite time.
    InvalidTimeStep(f32),
}

impl fmt::Display for PopulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undersized(size) => write!(
                f,
                "population of size {} cannot select two parents",
                size
            ),
            Self::InvalidEpochDuration(duration) => {
                write!(f, "invalid epoch duration {}", duration)
            }
            Self::InvalidTimeStep(dt) => write!(f, "invalid time step {}", dt),
        }
    }
}

impl Error for PopulationError {}
