use anyhow::{Context, Result};
use log::{debug, log_enabled, Level};

use engine::{GameEngine, PositionHandle};
use model::Evaluator;

use super::{release_all, select_move, Episode, Selection, SelfPlayOptions};

/// Plays one game against itself with the greedy move selector until no move is returned.
///
/// A game that is already over at the initial position yields an empty trace, the initial position is
/// released once its result has been read.
pub fn play_self_one<E, M>(engine: &E, evaluator: &M, options: &SelfPlayOptions) -> Result<Episode>
where
    E: GameEngine,
    M: Evaluator,
{
    let mut trace: Vec<PositionHandle> = Vec::new();
    let mut position = engine.initial_position()?;

    let selection = loop {
        match select_move(engine, evaluator, &position, options.initial_best_score) {
            Ok(Selection::Move(next)) => {
                trace.push(position);
                position = next;
            }
            Ok(selection) => break selection,
            Err(err) => {
                engine.release(position);
                release_all(engine, trace);
                return Err(err);
            }
        }
    };

    let result = match engine.terminal_result(&position) {
        Ok(result) => result,
        Err(err) => {
            engine.release(position);
            release_all(engine, trace);
            let err = if selection == Selection::BelowBaseline {
                err.context(format!(
                    "No successor scored above the initial best score of {}",
                    options.initial_best_score
                ))
            } else {
                err
            };
            return Err(err);
        }
    };

    if log_enabled!(Level::Debug) {
        let description = engine
            .describe(&position)
            .context("Failed to describe the final position");

        match description {
            Ok(description) => debug!("{}\n{}", description, result),
            Err(err) => {
                engine.release(position);
                release_all(engine, trace);
                return Err(err);
            }
        }
    }

    if trace.is_empty() {
        engine.release(position);
    } else {
        trace.push(position);
    }

    Ok(Episode::new(trace, result))
}
