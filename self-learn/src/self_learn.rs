use anyhow::{Context, Result};
use common::create_rng;
use log::{debug, info, log_enabled, warn, Level};
use rand::rngs::StdRng;
use std::time::Instant;

use engine::GameEngine;
use model::{Evaluator, LabeledExample};
use self_play::{assign_credit, play_self_one, SelfPlayOptions};

use super::{IterationMetrics, SelfLearnOptions, SelfLearnPersistance};

/// Alternates self-play and training. Examples that do not fill a batch stay in the pool and are trained
/// together with those of later games.
pub struct SelfLearn<'a, E, M> {
    engine: &'a E,
    evaluator: &'a mut M,
    self_learn_options: &'a SelfLearnOptions,
    self_play_options: &'a SelfPlayOptions,
    persistance: Option<SelfLearnPersistance>,
    pool: Vec<LabeledExample>,
    rng: StdRng,
    iteration: usize,
    starting_run_time: Instant,
}

impl<'a, E, M> SelfLearn<'a, E, M>
where
    E: GameEngine,
    M: Evaluator,
{
    pub fn new(
        engine: &'a E,
        evaluator: &'a mut M,
        self_learn_options: &'a SelfLearnOptions,
        self_play_options: &'a SelfPlayOptions,
    ) -> Self {
        Self {
            engine,
            evaluator,
            self_learn_options,
            self_play_options,
            persistance: None,
            pool: Vec::new(),
            rng: create_rng(self_learn_options.seed),
            iteration: 0,
            starting_run_time: Instant::now(),
        }
    }

    /// Also write a record of every iteration.
    pub fn with_persistance(mut self, persistance: SelfLearnPersistance) -> Self {
        self.persistance = Some(persistance);
        self
    }

    /// Examples waiting for a full batch.
    pub fn pool(&self) -> &[LabeledExample] {
        &self.pool
    }

    /// Number of iterations completed.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Restores the checkpoint being trained when one exists. Returns whether it did.
    pub fn resume(&mut self) -> Result<bool> {
        let checkpoint_name = &self.self_learn_options.checkpoint_name;

        if !self.evaluator.has_checkpoint(checkpoint_name) {
            warn!(
                "Checkpoint {} not found, starting from fresh parameters",
                checkpoint_name
            );
            return Ok(false);
        }

        self.evaluator
            .restore_checkpoint(checkpoint_name)
            .with_context(|| format!("Failed to resume from checkpoint {}", checkpoint_name))?;

        Ok(true)
    }

    /// Runs every configured iteration. The first failure aborts the run, the last saved checkpoint is
    /// where to pick up from.
    pub fn learn(&mut self) -> Result<()> {
        if self.self_learn_options.resume {
            self.resume()?;
        }

        for _ in 0..self.self_learn_options.iterations {
            self.run_iteration()?;
        }

        info!(
            "Finished {} iterations, {} examples left in the pool",
            self.iteration,
            self.pool.len()
        );

        Ok(())
    }

    /// Plays one game, adds its examples to the pool, trains every full batch and saves the checkpoint.
    pub fn run_iteration(&mut self) -> Result<IterationMetrics> {
        let iteration = self.iteration + 1;
        let engine = self.engine;

        let episode = play_self_one(engine, &*self.evaluator, self.self_play_options)
            .with_context(|| format!("Self play failed in iteration {}", iteration))?;
        let plies = episode.plies();
        let result = *episode.result();

        let examples = assign_credit(
            engine,
            episode,
            self.self_play_options.temporal_decay,
            &mut self.rng,
        )?;
        let labels: Vec<f32> = examples.iter().map(|e| e.label).collect();

        let mut pool = std::mem::take(&mut self.pool);
        pool.extend(examples);

        let outcome = self.evaluator.train_batch(pool)?;
        self.pool = outcome.remainder;

        let mut losses = Vec::with_capacity(outcome.reports.len());
        for report in outcome.reports {
            if log_enabled!(Level::Debug) {
                let predictions = report
                    .predictions
                    .iter()
                    .map(|(prediction, label)| format!("({:.4}, {:.4})", prediction, label))
                    .collect::<Vec<_>>()
                    .join(", ");
                debug!("Predictions: [{}]", predictions);
            }

            info!("Loss: {:.6}", report.loss);
            losses.push(report.loss);
        }

        self.evaluator
            .save_checkpoint(&self.self_learn_options.checkpoint_name)?;

        self.iteration = iteration;

        let metrics = IterationMetrics::new(
            iteration,
            plies,
            result,
            labels,
            losses,
            self.pool.len(),
        );

        if let Some(persistance) = self.persistance.as_mut() {
            persistance.write(&metrics)?;
        }

        let elapsed_secs = self.starting_run_time.elapsed().as_secs_f32();

        info!(
            "Iteration: {}, Plies: {}, Winner: {}, Margin: {}, Examples: {}, Pool: {}, Batches: {}, Mean Loss: {}, Elapsed: {:.2}m, GPM: {:.2}",
            iteration,
            plies,
            result.winner,
            result.margin,
            metrics.num_examples(),
            metrics.pool_size(),
            metrics.num_batches(),
            metrics
                .mean_loss()
                .map_or_else(|| "-".to_string(), |loss| format!("{:.6}", loss)),
            elapsed_secs / 60.0,
            iteration as f32 / elapsed_secs.max(f32::EPSILON) * 60.0
        );

        Ok(metrics)
    }
}
