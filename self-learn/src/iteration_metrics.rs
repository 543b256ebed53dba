use engine::TerminalResult;
use serde::{Deserialize, Serialize};

/// What happened in one iteration of self-learning: the game that was played, the labels it produced and
/// the batches that were trained afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IterationMetrics {
    iteration: usize,
    plies: usize,
    result: TerminalResult,
    labels: Vec<f32>,
    losses: Vec<f32>,
    pool_size: usize,
}

impl IterationMetrics {
    pub fn new(
        iteration: usize,
        plies: usize,
        result: TerminalResult,
        labels: Vec<f32>,
        losses: Vec<f32>,
        pool_size: usize,
    ) -> Self {
        Self {
            iteration,
            plies,
            result,
            labels,
            losses,
            pool_size,
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn result(&self) -> &TerminalResult {
        &self.result
    }

    /// Labels of the examples the game added to the pool, in the order they were added.
    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    pub fn num_examples(&self) -> usize {
        self.labels.len()
    }

    /// Loss of every batch trained this iteration.
    pub fn losses(&self) -> &[f32] {
        &self.losses
    }

    pub fn num_batches(&self) -> usize {
        self.losses.len()
    }

    pub fn mean_loss(&self) -> Option<f32> {
        if self.losses.is_empty() {
            return None;
        }

        Some(self.losses.iter().sum::<f32>() / self.losses.len() as f32)
    }

    /// Examples left over for the next iteration.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}
