//! Feed-forward networks backing the pathway classifiers
//!
//! A small fully-connected network with two hidden layers, sigmoid
//! activations throughout, mean-squared-error loss, and plain stochastic
//! gradient descent. Weight initialisation is seeded, so training is
//! deterministic for a fixed sample order.
//!
//! The externally observable contract is statistical: after training,
//! scores for inputs near a training example should rank the true class
//! highly. Nothing here promises bit-exact outputs across versions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ============================================================================
// Training Configuration
// ============================================================================

/// Hyperparameters for network construction and fitting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetConfig {
    /// Width of the first hidden layer
    pub hidden1: usize,
    /// Width of the second hidden layer
    pub hidden2: usize,
    /// SGD learning rate
    pub learning_rate: f64,
    /// Maximum training epochs over the batch
    pub max_epochs: usize,
    /// Stop early once mean squared error falls below this
    pub error_threshold: f64,
    /// Seed for weight initialisation
    pub seed: u64,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            hidden1: 16,
            hidden2: 16,
            learning_rate: 0.3,
            max_epochs: 2000,
            error_threshold: 0.005,
            seed: 0x5eed,
        }
    }
}

// ============================================================================
// Dense Network
// ============================================================================

/// One fully-connected layer: weights in row-major `[out][in]` order.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct DenseLayer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl DenseLayer {
    fn new(input: usize, output: usize, rng: &mut StdRng) -> Self {
        // Small symmetric init keeps sigmoids out of saturation at start.
        let weights = (0..output)
            .map(|_| (0..input).map(|_| rng.gen_range(-0.5..0.5)).collect())
            .collect();
        let biases = (0..output).map(|_| rng.gen_range(-0.5..0.5)).collect();
        Self { weights, biases }
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.biases.iter())
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input.iter()).map(|(w, x)| w * x).sum();
                sigmoid(sum + bias)
            })
            .collect()
    }
}

/// Two-hidden-layer sigmoid network trained with SGD on one-hot targets.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
    input_len: usize,
    output_len: usize,
}

impl DenseNetwork {
    /// Build an untrained network for the given input/output widths.
    #[must_use]
    pub fn new(input_len: usize, output_len: usize, config: &NetConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let layers = vec![
            DenseLayer::new(input_len, config.hidden1, &mut rng),
            DenseLayer::new(config.hidden1, config.hidden2, &mut rng),
            DenseLayer::new(config.hidden2, output_len, &mut rng),
        ];
        Self {
            layers,
            input_len,
            output_len,
        }
    }

    /// Expected input vector length.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Output vector length (the class count).
    #[must_use]
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Forward pass: per-class activations in `[0, 1]`.
    #[must_use]
    pub fn run(&self, input: &[f64]) -> Vec<f64> {
        let mut activation = input.to_vec();
        for layer in &self.layers {
            activation = layer.forward(&activation);
        }
        activation
    }

    /// Fit the network on `(input, one-hot target)` pairs.
    ///
    /// Iterates full passes over the batch until the mean squared error
    /// drops below `error_threshold` or `max_epochs` is reached. Returns
    /// the final mean squared error.
    pub fn train(&mut self, samples: &[(Vec<f64>, Vec<f64>)], config: &NetConfig) -> f64 {
        let mut error = f64::MAX;

        for epoch in 0..config.max_epochs {
            error = 0.0;
            for (input, target) in samples {
                error += self.train_step(input, target, config.learning_rate);
            }
            error /= samples.len().max(1) as f64;

            if error < config.error_threshold {
                tracing::debug!(epoch, error, "network converged");
                return error;
            }
        }

        tracing::debug!(error, "network hit epoch cap");
        error
    }

    /// One backpropagation step for a single sample. Returns its MSE.
    fn train_step(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> f64 {
        // Forward pass, keeping every layer's activations.
        let mut activations: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_vec());
        for layer in &self.layers {
            let next = layer.forward(&activations[activations.len() - 1]);
            activations.push(next);
        }

        let output = &activations[activations.len() - 1];
        let mse: f64 = output
            .iter()
            .zip(target.iter())
            .map(|(o, t)| (o - t) * (o - t))
            .sum::<f64>()
            / output.len().max(1) as f64;

        // Output-layer delta: (o - t) * o * (1 - o)
        let mut delta: Vec<f64> = output
            .iter()
            .zip(target.iter())
            .map(|(o, t)| (o - t) * o * (1.0 - o))
            .collect();

        // Backward pass, layer by layer.
        for l in (0..self.layers.len()).rev() {
            let layer_input = &activations[l];

            // Delta for the layer below, before this layer's weights move.
            let next_delta: Vec<f64> = if l > 0 {
                (0..layer_input.len())
                    .map(|i| {
                        let upstream: f64 = self.layers[l]
                            .weights
                            .iter()
                            .zip(delta.iter())
                            .map(|(row, d)| row[i] * d)
                            .sum();
                        upstream * layer_input[i] * (1.0 - layer_input[i])
                    })
                    .collect()
            } else {
                Vec::new()
            };

            let layer = &mut self.layers[l];
            for (j, d) in delta.iter().enumerate() {
                for (i, x) in layer_input.iter().enumerate() {
                    layer.weights[j][i] -= learning_rate * d * x;
                }
                layer.biases[j] -= learning_rate * d;
            }

            delta = next_delta;
        }

        mse
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// ============================================================================
// Tests
// ============================================================================
