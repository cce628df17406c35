use super::{NetworkError, Topology};

use rand::Rng;

/// Activation value of every bias node.
const BIAS: f64 = 1.0;

/// A three-layer, fully connected feedforward network
/// with sigmoid activations and min-max normalized inputs.
///
/// Node buffers keep their bias node at index 0, so
/// each node's weights form one contiguous slice:
/// hidden node `j` reads `input_weights[j * (inputs + 1)..]`,
/// output node `k` reads `hidden_weights[k * (hidden + 1)..]`,
/// the bias weight coming first in both.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedforwardNetwork {
    topology: Topology,
    input_weights: Vec<f64>,
    hidden_weights: Vec<f64>,
    input_nodes: Vec<f64>,
    hidden_nodes: Vec<f64>,
    output_nodes: Vec<f64>,
}

impl FeedforwardNetwork {
    /// Returns a network with all weights drawn
    /// uniformly from `[-init_scale, init_scale)`.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::networks::{FeedforwardNetwork, Topology};
    ///
    /// let mut rng = neuroevo::seeded_rng(42);
    /// let network = FeedforwardNetwork::new(Topology::new(3, 3, 1).unwrap(), 2.0, &mut rng);
    ///
    /// assert_eq!(network.input_weights().len(), 12);
    /// assert_eq!(network.hidden_weights().len(), 4);
    /// assert!(network.input_weights().iter().all(|w| w.abs() <= 2.0));
    /// ```
    pub fn new<R: Rng + ?Sized>(topology: Topology, init_scale: f64, rng: &mut R) -> FeedforwardNetwork {
        let input_weights = random_weights(topology.input_weight_count(), init_scale, rng);
        FeedforwardNetwork::assemble(topology, input_weights, init_scale, rng)
    }

    /// Returns a network using the supplied input-to-hidden weights.
    /// Hidden-to-output weights are drawn at random as in [`new`].
    ///
    /// [`new`]: FeedforwardNetwork::new
    ///
    /// # Errors
    /// Returns [`NetworkError::WeightCountMismatch`] if `input_weights`
    /// does not hold exactly [`input_weight_count`] values.
    ///
    /// [`input_weight_count`]: Topology::input_weight_count
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::networks::{FeedforwardNetwork, NetworkError, Topology};
    ///
    /// let mut rng = neuroevo::seeded_rng(0);
    /// let topology = Topology::new(1, 2, 1).unwrap();
    ///
    /// let network =
    ///     FeedforwardNetwork::with_input_weights(topology, vec![0.5; 4], 1.0, &mut rng).unwrap();
    /// assert_eq!(network.input_weights(), &[0.5; 4]);
    ///
    /// assert_eq!(
    ///     FeedforwardNetwork::with_input_weights(topology, vec![0.5; 3], 1.0, &mut rng),
    ///     Err(NetworkError::WeightCountMismatch { expected: 4, found: 3 })
    /// );
    /// ```
    pub fn with_input_weights<R: Rng + ?Sized>(
        topology: Topology,
        input_weights: Vec<f64>,
        init_scale: f64,
        rng: &mut R,
    ) -> Result<FeedforwardNetwork, NetworkError> {
        let expected = topology.input_weight_count();
        if input_weights.len() != expected {
            return Err(NetworkError::WeightCountMismatch {
                expected,
                found: input_weights.len(),
            });
        }
        Ok(FeedforwardNetwork::assemble(
            topology,
            input_weights,
            init_scale,
            rng,
        ))
    }

    fn assemble<R: Rng + ?Sized>(
        topology: Topology,
        input_weights: Vec<f64>,
        init_scale: f64,
        rng: &mut R,
    ) -> FeedforwardNetwork {
        let hidden_weights = random_weights(topology.hidden_weight_count(), init_scale, rng);

        let mut input_nodes = vec![0.0; topology.input_count.get() + 1];
        input_nodes[0] = BIAS;
        let mut hidden_nodes = vec![0.0; topology.hidden_count.get() + 1];
        hidden_nodes[0] = BIAS;

        FeedforwardNetwork {
            topology,
            input_weights,
            hidden_weights,
            input_nodes,
            hidden_nodes,
            output_nodes: vec![0.0; topology.output_count.get()],
        }
    }

    /// Runs one forward pass and returns the output activations,
    /// each in `(0, 1)`.
    ///
    /// Inputs are min-max normalized first; if they are
    /// all equal, the normalized inputs are all zero.
    ///
    /// # Errors
    /// Returns [`NetworkError::DimensionMismatch`] if the number
    /// of inputs differs from the network's input count.
    ///
    /// # Examples
    /// ```
    /// use neuroevo_nn::networks::{FeedforwardNetwork, NetworkError, Topology};
    ///
    /// let mut rng = neuroevo::seeded_rng(3);
    /// let mut network = FeedforwardNetwork::new(Topology::new(3, 3, 1).unwrap(), 2.0, &mut rng);
    ///
    /// let output = network.feed_forward(&[1.0, 0.0, 0.0]).unwrap()[0];
    /// assert!(output > 0.0 && output < 1.0);
    ///
    /// assert_eq!(
    ///     network.feed_forward(&[1.0, 0.0]),
    ///     Err(NetworkError::DimensionMismatch { expected: 3, found: 2 })
    /// );
    /// ```
    pub fn feed_forward(&mut self, inputs: &[f64]) -> Result<&[f64], NetworkError> {
        let expected = self.topology.input_count.get();
        if inputs.len() != expected {
            return Err(NetworkError::DimensionMismatch {
                expected,
                found: inputs.len(),
            });
        }

        normalize_into(inputs, &mut self.input_nodes[1..]);
        activate_layer(
            &self.input_nodes,
            &self.input_weights,
            &mut self.hidden_nodes[1..],
        );
        activate_layer(
            &self.hidden_nodes,
            &self.hidden_weights,
            &mut self.output_nodes,
        );

        Ok(&self.output_nodes)
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn input_count(&self) -> usize {
        self.topology.input_count.get()
    }

    pub fn hidden_count(&self) -> usize {
        self.topology.hidden_count.get()
    }

    pub fn output_count(&self) -> usize {
        self.topology.output_count.get()
    }

    /// Input-to-hidden weights, grouped per hidden node.
    pub fn input_weights(&self) -> &[f64] {
        &self.input_weights
    }

    /// Hidden-to-output weights, grouped per output node.
    pub fn hidden_weights(&self) -> &[f64] {
        &self.hidden_weights
    }

    /// Outputs of the most recent forward pass;
    /// all zero before the first one.
    pub fn outputs(&self) -> &[f64] {
        &self.output_nodes
    }
}

/// The logistic function.
///
/// # Examples
/// ```
/// use neuroevo_nn::networks::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!(sigmoid(10.0) > 0.99);
/// ```
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Rescales `values` so that the smallest maps to 0 and the
/// largest to 1. Any value the rescaling leaves undefined,
/// e.g. when all values are equal, becomes 0.
///
/// # Examples
/// ```
/// use neuroevo_nn::networks::min_max_normalize;
///
/// assert_eq!(min_max_normalize(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
/// assert_eq!(min_max_normalize(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
/// ```
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let mut normalized = vec![0.0; values.len()];
    normalize_into(values, &mut normalized);
    normalized
}

fn normalize_into(values: &[f64], out: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for (slot, value) in out.iter_mut().zip(values) {
        let normalized = (value - min) / (max - min);
        *slot = if normalized.is_nan() { 0.0 } else { normalized };
    }
}

/// Writes `sigmoid(weights · previous)` into each node of `next`,
/// taking one `previous.len()`-sized chunk of weights per node.
fn activate_layer(previous: &[f64], weights: &[f64], next: &mut [f64]) {
    for (node, node_weights) in next.iter_mut().zip(weights.chunks_exact(previous.len())) {
        *node = sigmoid(
            node_weights
                .iter()
                .zip(previous)
                .map(|(weight, activation)| weight * activation)
                .sum(),
        );
    }
}

fn random_weights<R: Rng + ?Sized>(count: usize, scale: f64, rng: &mut R) -> Vec<f64> {
    (0..count)
        .map(|_| rng.gen::<f64>() * 2.0 * scale - scale)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use neuroevo::seeded_rng;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn new_sizes_buffers() {
        let mut rng = seeded_rng(1);
        let network = FeedforwardNetwork::new(Topology::new(5, 3, 2).unwrap(), 1.0, &mut rng);
        assert_eq!(network.input_count(), 5);
        assert_eq!(network.hidden_count(), 3);
        assert_eq!(network.output_count(), 2);
        assert_eq!(network.input_weights().len(), 18);
        assert_eq!(network.hidden_weights().len(), 8);
        assert_eq!(network.outputs(), &[0.0, 0.0]);
    }

    #[test]
    fn random_weights_within_scale() {
        let mut rng = seeded_rng(2);
        let weights = random_weights(1000, 0.25, &mut rng);
        assert!(weights.iter().all(|w| (-0.25..0.25).contains(w)));
        assert!(weights.iter().any(|&w| w < 0.0));
        assert!(weights.iter().any(|&w| w > 0.0));

        assert!(random_weights(10, 0.0, &mut rng).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn rejects_wrong_input_count() {
        let mut rng = seeded_rng(3);
        let mut network = FeedforwardNetwork::new(Topology::new(3, 2, 1).unwrap(), 1.0, &mut rng);

        assert_eq!(
            network.feed_forward(&[0.0, 1.0]),
            Err(NetworkError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            network.feed_forward(&[0.0, 1.0, 2.0, 3.0]),
            Err(NetworkError::DimensionMismatch {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(network.outputs(), &[0.0]);
    }

    #[test]
    fn hand_computed_pass() {
        let mut rng = seeded_rng(4);
        let topology = Topology::new(2, 2, 1).unwrap();
        let network = FeedforwardNetwork::with_input_weights(
            topology,
            vec![0.5, -1.0, 2.0, -0.25, 3.0, 0.75],
            1.0,
            &mut rng,
        );
        let mut network = network.unwrap();
        let hw = network.hidden_weights().to_vec();

        // [3, 1] normalizes to [1, 0].
        let h1 = sigmoid(0.5 * 1.0 + -1.0 * 1.0 + 2.0 * 0.0);
        let h2 = sigmoid(-0.25 * 1.0 + 3.0 * 1.0 + 0.75 * 0.0);
        let expected = sigmoid(hw[0] * 1.0 + hw[1] * h1 + hw[2] * h2);

        let output = network.feed_forward(&[3.0, 1.0]).unwrap()[0];
        assert!(close(output, expected));
        assert!(close(network.outputs()[0], expected));
    }

    #[test]
    fn equal_inputs_act_as_zero() {
        let mut rng = seeded_rng(5);
        let mut network = FeedforwardNetwork::new(Topology::new(3, 4, 2).unwrap(), 2.0, &mut rng);

        let from_equal = network.feed_forward(&[5.0, 5.0, 5.0]).unwrap().to_vec();
        assert!(from_equal.iter().all(|o| o.is_finite() && *o > 0.0 && *o < 1.0));

        let from_zero = network.feed_forward(&[0.0, 0.0, 0.0]).unwrap().to_vec();
        assert_eq!(from_equal, from_zero);
    }

    #[test]
    fn repeated_passes_agree() {
        let mut rng = seeded_rng(6);
        let mut network = FeedforwardNetwork::new(Topology::new(3, 3, 1).unwrap(), 2.0, &mut rng);

        let first = network.feed_forward(&[1.0, 0.0, 0.0]).unwrap()[0];
        network.feed_forward(&[0.0, 7.0, -3.0]).unwrap();
        let second = network.feed_forward(&[1.0, 0.0, 0.0]).unwrap()[0];
        assert!(first > 0.0 && first < 1.0);
        assert_eq!(first, second);
    }

    #[test]
    fn normalization() {
        assert_eq!(min_max_normalize(&[-1.0, 1.0]), vec![0.0, 1.0]);
        assert_eq!(min_max_normalize(&[4.0]), vec![0.0]);
        assert!(min_max_normalize(&[]).is_empty());

        let normalized = min_max_normalize(&[f64::NAN, 1.0, 2.0]);
        assert_eq!(normalized, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn sigmoid_range() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(close(sigmoid(2.0) + sigmoid(-2.0), 1.0));
        assert!(sigmoid(-50.0) > 0.0);
    }
}
