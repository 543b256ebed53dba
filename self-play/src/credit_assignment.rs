use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use engine::{GameEngine, TerminalResult};
use model::LabeledExample;

use super::{extract_features, release_all, Episode};

/// Temporal-difference labels for a trace of `num_positions`, ordered from the terminal position back to
/// the initial one.
///
/// The terminal position is labeled +1 when the first player won and the trace length is even, -1 otherwise.
/// Each earlier ply belongs to the other side, so the label flips sign and shrinks by `temporal_decay`.
pub fn temporal_difference_labels(
    num_positions: usize,
    result: &TerminalResult,
    temporal_decay: f32,
) -> Vec<f32> {
    let mut label = if result.winner && num_positions % 2 == 0 {
        1.0
    } else {
        -1.0
    };

    (0..num_positions)
        .map(|_| {
            let current = label;
            label *= -temporal_decay;
            current
        })
        .collect()
}

/// Turns a finished episode into one labeled example per position and releases every handle of the trace.
/// The examples come back shuffled.
pub fn assign_credit<E, R>(
    engine: &E,
    episode: Episode,
    temporal_decay: f32,
    rng: &mut R,
) -> Result<Vec<LabeledExample>>
where
    E: GameEngine,
    R: Rng + ?Sized,
{
    let (trace, result) = episode.into_inner();
    let labels = temporal_difference_labels(trace.len(), &result, temporal_decay);
    let mut examples = Vec::with_capacity(trace.len());
    let mut positions = trace.into_iter().rev().zip(labels);

    while let Some((position, label)) = positions.next() {
        let features = extract_features(engine, &position);
        engine.release(position);

        match features {
            Ok(features) => examples.push(LabeledExample::new(features, label)),
            Err(err) => {
                release_all(engine, positions.map(|(p, _)| p));
                return Err(err);
            }
        }
    }

    examples.shuffle(rng);

    Ok(examples)
}
