//! Fixed-topology feedforward networks and
//! the activation helpers they are built from.
mod errors;
mod feedforward;

pub use errors::*;
pub use feedforward::*;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Layer sizes of a three-layer feedforward network.
///
/// Bias nodes are not counted; every layer but the
/// output layer gets one on top of these counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    /// Number of network inputs.
    pub input_count: NonZeroUsize,
    /// Number of nodes in the hidden layer.
    pub hidden_count: NonZeroUsize,
    /// Number of network outputs.
    pub output_count: NonZeroUsize,
}

impl Topology {
    /// Returns a topology with the given layer sizes,
    /// or `None` if any of them is zero.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::networks::Topology;
    ///
    /// let topology = Topology::new(3, 4, 2).unwrap();
    /// assert_eq!(topology.input_weight_count(), 16);
    /// assert_eq!(topology.hidden_weight_count(), 10);
    ///
    /// assert!(Topology::new(3, 0, 2).is_none());
    /// ```
    pub fn new(input_count: usize, hidden_count: usize, output_count: usize) -> Option<Topology> {
        Some(Topology {
            input_count: NonZeroUsize::new(input_count)?,
            hidden_count: NonZeroUsize::new(hidden_count)?,
            output_count: NonZeroUsize::new(output_count)?,
        })
    }

    /// The smallest possible topology, with a
    /// single node in each layer.
    pub const fn minimal() -> Topology {
        Topology {
            input_count: NonZeroUsize::MIN,
            hidden_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
        }
    }

    /// Number of weights between the input
    /// (plus bias) and hidden layers.
    pub fn input_weight_count(&self) -> usize {
        (self.input_count.get() + 1) * self.hidden_count.get()
    }

    /// Number of weights between the hidden
    /// (plus bias) and output layers.
    pub fn hidden_weight_count(&self) -> usize {
        (self.hidden_count.get() + 1) * self.output_count.get()
    }
}
