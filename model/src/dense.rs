use anyhow::{anyhow, Result};
use log::info;
use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use serde::{Deserialize, Serialize};

use common::create_rng;

use super::{BatchReport, CheckpointStore, DenseOptions, Evaluator, EvaluatorFault, LabeledExample};

/// A fully connected layer. `weights` has one row per output and one column per input.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Layer {
    weights: Array2<f32>,
    biases: Array1<f32>,
}

impl Layer {
    /// Xavier uniform weights and zero biases.
    fn new<R: Rng>(inputs: usize, outputs: usize, rng: &mut R) -> Self {
        let limit = (6.0 / (inputs + outputs) as f32).sqrt();
        let weights = Array2::from_shape_fn((outputs, inputs), |_| rng.gen_range(-limit..=limit));

        Self {
            weights,
            biases: Array1::zeros(outputs),
        }
    }

    fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        (self.weights.dot(input) + &self.biases).mapv(sigmoid)
    }

    fn is_consistent(&self) -> bool {
        self.biases.len() == self.outputs()
    }
}

#[derive(Serialize, Deserialize)]
struct DenseCheckpoint {
    input_width: usize,
    layers: Vec<Layer>,
}

/// A small fully connected network with sigmoid activations. The final sigmoid is stretched onto [-1, 1].
///
/// Trained by plain gradient descent on the summed squared error of each batch.
pub struct DenseEvaluator {
    input_width: usize,
    learning_rate: f32,
    batch_size: usize,
    layers: Vec<Layer>,
    checkpoints: CheckpointStore,
}

impl DenseEvaluator {
    pub fn new(input_width: usize, options: &DenseOptions, checkpoints: CheckpointStore) -> Result<Self> {
        if input_width == 0 {
            return Err(anyhow!("Input width must be greater than zero"));
        }

        if options.train_batch_size == 0 {
            return Err(EvaluatorFault::EmptyBatchSize.into());
        }

        if options.hidden_layers.iter().any(|&size| size == 0) {
            return Err(anyhow!("Hidden layers must not be empty: {:?}", options.hidden_layers));
        }

        let mut rng = create_rng(options.seed);
        let mut widths = vec![input_width];
        widths.extend(&options.hidden_layers);
        widths.push(1);

        let layers = widths
            .windows(2)
            .map(|w| Layer::new(w[0], w[1], &mut rng))
            .collect();

        Ok(Self {
            input_width,
            learning_rate: options.learning_rate,
            batch_size: options.train_batch_size,
            layers,
            checkpoints,
        })
    }

    fn check_width(&self, features: &[f32]) -> Result<()> {
        if features.len() != self.input_width {
            return Err(EvaluatorFault::InputWidth {
                expected: self.input_width,
                actual: features.len(),
            }
            .into());
        }

        Ok(())
    }

    /// Activations of every layer, starting with the input itself.
    fn activations(&self, features: &[f32]) -> Vec<Array1<f32>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(Array1::from(features.to_vec()));

        for layer in &self.layers {
            let next = layer.forward(&activations[activations.len() - 1]);
            activations.push(next);
        }

        activations
    }

    fn accumulate_gradients(
        &self,
        activations: &[Array1<f32>],
        output_delta: f32,
        weight_grads: &mut [Array2<f32>],
        bias_grads: &mut [Array1<f32>],
    ) {
        let mut delta = Array1::from_elem(1, output_delta);

        for (idx, layer) in self.layers.iter().enumerate().rev() {
            let input = &activations[idx];

            let outer = delta
                .view()
                .insert_axis(Axis(1))
                .dot(&input.view().insert_axis(Axis(0)));
            weight_grads[idx] += &outer;
            bias_grads[idx] += &delta;

            if idx > 0 {
                delta = layer.weights.t().dot(&delta) * input.mapv(|a| a * (1.0 - a));
            }
        }
    }
}

impl Evaluator for DenseEvaluator {
    fn input_width(&self) -> usize {
        self.input_width
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn evaluate(&self, features: &[f32]) -> Result<f32> {
        self.check_width(features)?;

        let activations = self.activations(features);
        let value = to_value(activations[activations.len() - 1][0]);

        if !value.is_finite() {
            return Err(EvaluatorFault::NonFinite.into());
        }

        Ok(value)
    }

    fn update(&mut self, batch: &[LabeledExample]) -> Result<BatchReport> {
        for example in batch {
            self.check_width(&example.features)?;
            if !(-1.0..=1.0).contains(&example.label) {
                return Err(EvaluatorFault::LabelOutOfRange(example.label).into());
            }
        }

        let mut weight_grads: Vec<Array2<f32>> = self
            .layers
            .iter()
            .map(|l| Array2::zeros(l.weights.raw_dim()))
            .collect();
        let mut bias_grads: Vec<Array1<f32>> = self
            .layers
            .iter()
            .map(|l| Array1::zeros(l.biases.raw_dim()))
            .collect();
        let mut predictions = Vec::with_capacity(batch.len());
        let mut loss = 0.0;

        for example in batch {
            let activations = self.activations(&example.features);
            let output = activations[activations.len() - 1][0];
            let prediction = to_value(output);
            let error = prediction - example.label;

            loss += error * error;
            predictions.push((prediction, example.label));

            // d(error^2)/d(prediction) * d(prediction)/d(output) * d(output)/d(z)
            let output_delta = 2.0 * error * 2.0 * output * (1.0 - output);
            self.accumulate_gradients(&activations, output_delta, &mut weight_grads, &mut bias_grads);
        }

        if !loss.is_finite() {
            return Err(EvaluatorFault::NonFinite.into());
        }

        let learning_rate = self.learning_rate;
        for ((layer, w_grad), b_grad) in self.layers.iter_mut().zip(&weight_grads).zip(&bias_grads) {
            layer.weights.scaled_add(-learning_rate, w_grad);
            layer.biases.scaled_add(-learning_rate, b_grad);
        }

        Ok(BatchReport { predictions, loss })
    }

    fn save_checkpoint(&self, name: &str) -> Result<()> {
        let checkpoint = DenseCheckpoint {
            input_width: self.input_width,
            layers: self.layers.clone(),
        };

        let path = self.checkpoints.write(name, &checkpoint)?;
        info!("Saved checkpoint to {:?}", path);

        Ok(())
    }

    fn restore_checkpoint(&mut self, name: &str) -> Result<()> {
        let checkpoint: DenseCheckpoint = self.checkpoints.read(name)?;

        let connected = checkpoint
            .layers
            .windows(2)
            .all(|w| w[0].outputs() == w[1].inputs());
        let first_inputs = checkpoint.layers.first().map(Layer::inputs);
        let last_outputs = checkpoint.layers.last().map(Layer::outputs);

        if checkpoint.input_width != self.input_width || first_inputs != Some(self.input_width) {
            return Err(EvaluatorFault::CheckpointShape {
                name: name.to_string(),
                expected: self.input_width,
                actual: checkpoint.input_width,
            }
            .into());
        }

        if !connected || last_outputs != Some(1) || !checkpoint.layers.iter().all(Layer::is_consistent) {
            return Err(anyhow!("Checkpoint {} has malformed layers", name));
        }

        self.layers = checkpoint.layers;
        info!("Restored checkpoint {}", name);

        Ok(())
    }

    fn has_checkpoint(&self, name: &str) -> bool {
        self.checkpoints.exists(name)
    }
}

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

fn to_value(output: f32) -> f32 {
    (output - 0.5) * 2.0
}
