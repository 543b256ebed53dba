use anyhow::{anyhow, Result};
use std::cell::Cell;

use model::{BatchReport, Evaluator, LabeledExample};

/// Scores a position with its first feature.
#[derive(Default)]
pub struct FirstFeatureEvaluator {
    pub evaluations: Cell<usize>,
}

impl Evaluator for FirstFeatureEvaluator {
    fn input_width(&self) -> usize {
        1
    }

    fn batch_size(&self) -> usize {
        1
    }

    fn evaluate(&self, features: &[f32]) -> Result<f32> {
        self.evaluations.set(self.evaluations.get() + 1);
        features
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Expected at least one feature"))
    }

    fn update(&mut self, batch: &[LabeledExample]) -> Result<BatchReport> {
        Ok(BatchReport {
            predictions: batch.iter().map(|e| (0.0, e.label)).collect(),
            loss: 0.0,
        })
    }

    fn save_checkpoint(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn restore_checkpoint(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn has_checkpoint(&self, _name: &str) -> bool {
        false
    }
}

/// Fails every evaluation.
pub struct FailingEvaluator;

impl Evaluator for FailingEvaluator {
    fn input_width(&self) -> usize {
        1
    }

    fn batch_size(&self) -> usize {
        1
    }

    fn evaluate(&self, _features: &[f32]) -> Result<f32> {
        Err(anyhow!("evaluation failed"))
    }

    fn update(&mut self, _batch: &[LabeledExample]) -> Result<BatchReport> {
        Err(anyhow!("update failed"))
    }

    fn save_checkpoint(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn restore_checkpoint(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn has_checkpoint(&self, _name: &str) -> bool {
        false
    }
}
