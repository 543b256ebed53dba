use anyhow::Result;

use super::EvaluatorFault;

/// A feature vector paired with its training target in [-1, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledExample {
    pub features: Vec<f32>,
    pub label: f32,
}

impl LabeledExample {
    pub fn new(features: Vec<f32>, label: f32) -> Self {
        Self { features, label }
    }
}

/// What a single parameter update saw: the prediction made for every example next to its label, and
/// the loss over the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    pub predictions: Vec<(f32, f32)>,
    pub loss: f32,
}

#[derive(Debug)]
pub struct TrainOutcome {
    /// Examples past the last full batch, in their original order.
    pub remainder: Vec<LabeledExample>,
    pub reports: Vec<BatchReport>,
}

pub trait Evaluator {
    /// Number of features every input vector must have.
    fn input_width(&self) -> usize;

    fn batch_size(&self) -> usize;

    /// Value estimate in [-1, 1].
    fn evaluate(&self, features: &[f32]) -> Result<f32>;

    /// Performs one parameter update from exactly one batch.
    fn update(&mut self, batch: &[LabeledExample]) -> Result<BatchReport>;

    fn save_checkpoint(&self, name: &str) -> Result<()>;

    fn restore_checkpoint(&mut self, name: &str) -> Result<()>;

    fn has_checkpoint(&self, name: &str) -> bool;

    /// Consumes the pool in consecutive full batches of `batch_size`. Whatever does not fill a batch is
    /// handed back so it can be topped up by later episodes.
    fn train_batch(&mut self, mut pool: Vec<LabeledExample>) -> Result<TrainOutcome> {
        let batch_size = self.batch_size();
        if batch_size == 0 {
            return Err(EvaluatorFault::EmptyBatchSize.into());
        }

        let num_batches = pool.len() / batch_size;
        let mut reports = Vec::with_capacity(num_batches);

        for batch in pool.chunks_exact(batch_size) {
            reports.push(self.update(batch)?);
        }

        let remainder = pool.split_off(num_batches * batch_size);

        Ok(TrainOutcome { remainder, reports })
    }
}
