use anyhow::Result;
use log::trace;

use engine::{GameEngine, PositionHandle};
use model::Evaluator;

use super::{extract_features, release_all};

#[derive(Debug, PartialEq, Eq)]
pub enum Selection {
    /// The successor to play. Every other successor has been released.
    Move(PositionHandle),
    /// The position has no legal moves.
    Terminal,
    /// There were legal moves but none scored above the initial best score. All of them were released.
    BelowBaseline,
}

/// One-ply greedy choice: scores every successor and keeps the first one with the strictly greatest score.
/// A successor has to beat `initial_best_score` to be chosen at all.
pub fn select_move<E, M>(
    engine: &E,
    evaluator: &M,
    position: &PositionHandle,
    initial_best_score: f32,
) -> Result<Selection>
where
    E: GameEngine,
    M: Evaluator,
{
    let successors = engine.successors(position)?;
    if successors.is_empty() {
        return Ok(Selection::Terminal);
    }

    let mut best: Option<PositionHandle> = None;
    let mut best_score = initial_best_score;
    let mut successors = successors.into_iter();

    while let Some(successor) = successors.next() {
        let score = match score_position(engine, evaluator, &successor) {
            Ok(score) => score,
            Err(err) => {
                engine.release(successor);
                release_all(engine, best.into_iter().chain(successors));
                return Err(err);
            }
        };

        trace!("{} scored {:.4}", successor, score);

        if score > best_score {
            best_score = score;
            if let Some(previous_best) = best.replace(successor) {
                engine.release(previous_best);
            }
        } else {
            engine.release(successor);
        }
    }

    Ok(best.map_or(Selection::BelowBaseline, Selection::Move))
}

fn score_position<E: GameEngine, M: Evaluator>(
    engine: &E,
    evaluator: &M,
    position: &PositionHandle,
) -> Result<f32> {
    let features = extract_features(engine, position)?;
    evaluator.evaluate(&features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingEvaluator, FirstFeatureEvaluator};
    use engine::{EngineFault, ScriptedEngine, ScriptedNode, TerminalResult};

    /// A root whose children score the given values, in enumeration order.
    fn fan(scores: &[f32]) -> ScriptedEngine {
        let children = (1..=scores.len()).collect();
        let mut nodes = vec![ScriptedNode::new(vec![0.0], children)];
        nodes.extend(
            scores
                .iter()
                .map(|&s| ScriptedNode::terminal(vec![s], TerminalResult::default())),
        );

        ScriptedEngine::new(1, nodes).unwrap()
    }

    fn chosen_node(engine: &ScriptedEngine, selection: &Selection) -> Option<usize> {
        match selection {
            Selection::Move(position) => Some(engine.node_of(position).unwrap()),
            _ => None,
        }
    }

    #[test]
    fn test_picks_highest_score() {
        let engine = fan(&[0.1, 0.7, 0.3]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();

        assert_eq!(chosen_node(&engine, &selection), Some(2));
        assert_eq!(evaluator.evaluations.get(), 3);
    }

    #[test]
    fn test_tie_keeps_first_in_enumeration_order() {
        let engine = fan(&[0.2, 0.9, 0.9, 0.5]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();

        assert_eq!(chosen_node(&engine, &selection), Some(2));
    }

    #[test]
    fn test_repeated_calls_choose_same_successor() {
        let engine = fan(&[0.4, 0.6, 0.6, 0.1]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let chosen: Vec<Option<usize>> = (0..5)
            .map(|_| {
                let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();
                let node = chosen_node(&engine, &selection);
                if let Selection::Move(position) = selection {
                    engine.release(position);
                }
                node
            })
            .collect();

        assert!(chosen.iter().all(|&c| c == Some(2)));
    }

    #[test]
    fn test_releases_every_successor_not_chosen() {
        let engine = fan(&[0.1, 0.7, 0.3, 0.9, 0.2]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();

        assert_eq!(chosen_node(&engine, &selection), Some(4));
        // the root and the chosen successor
        assert_eq!(engine.live_positions(), 2);
    }

    #[test]
    fn test_terminal_position_has_no_move() {
        let engine = fan(&[]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();

        assert_eq!(selection, Selection::Terminal);
        assert_eq!(evaluator.evaluations.get(), 0);
    }

    #[test]
    fn test_non_positive_scores_do_not_beat_zero_baseline() {
        let engine = fan(&[-0.3, 0.0, -0.1]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, 0.0).unwrap();

        assert_eq!(selection, Selection::BelowBaseline);
        assert_eq!(engine.live_positions(), 1);
    }

    #[test]
    fn test_baseline_below_range_always_moves() {
        let engine = fan(&[-0.3, -0.9, -0.1]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();

        let selection = select_move(&engine, &evaluator, &root, -2.0).unwrap();

        assert_eq!(chosen_node(&engine, &selection), Some(3));
    }

    #[test]
    fn test_evaluator_error_releases_successors() {
        let engine = fan(&[0.1, 0.2]);
        let root = engine.initial_position().unwrap();

        let res = select_move(&engine, &FailingEvaluator, &root, 0.0);

        assert!(res.is_err());
        assert_eq!(engine.live_positions(), 1);
    }

    #[test]
    fn test_released_position_is_engine_fault() {
        let engine = fan(&[0.1]);
        let evaluator = FirstFeatureEvaluator::default();
        let root = engine.initial_position().unwrap();
        let key = root.key();
        engine.release(root);

        let err = select_move(&engine, &evaluator, &PositionHandle::from_key(key), 0.0).unwrap_err();

        assert_eq!(
            err.downcast_ref::<EngineFault>(),
            Some(&EngineFault::UnknownPosition(key))
        );
    }
}
