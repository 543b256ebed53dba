use anyhow::Result;
use log::trace;
use parking_lot::Mutex;
use std::collections::HashMap;

use engine::{EngineFault, GameEngine, PositionHandle, TerminalResult};

use super::{GameState, FEATURE_WIDTH};

#[derive(Default)]
struct Positions {
    counter: u64,
    by_key: HashMap<u64, GameState>,
}

/// Connect 4 behind the handle boundary. Every position handed out is kept in a keyed registry until it
/// is released.
#[derive(Default)]
pub struct Engine {
    positions: Mutex<Positions>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions currently held for callers.
    pub fn live_positions(&self) -> usize {
        self.positions.lock().by_key.len()
    }

    fn put_position(&self, game_state: GameState) -> PositionHandle {
        let mut positions = self.positions.lock();
        positions.counter += 1;
        let key = positions.counter;
        positions.by_key.insert(key, game_state);
        PositionHandle::from_key(key)
    }

    fn get_position(&self, position: &PositionHandle) -> Result<GameState> {
        self.positions
            .lock()
            .by_key
            .get(&position.key())
            .cloned()
            .ok_or_else(|| EngineFault::UnknownPosition(position.key()).into())
    }
}

impl GameEngine for Engine {
    fn feature_width(&self) -> usize {
        FEATURE_WIDTH
    }

    fn initial_position(&self) -> Result<PositionHandle> {
        Ok(self.put_position(GameState::initial()))
    }

    fn successors(&self, position: &PositionHandle) -> Result<Vec<PositionHandle>> {
        let successors = self
            .get_position(position)?
            .successors()
            .into_iter()
            .map(|game_state| self.put_position(game_state))
            .collect::<Vec<_>>();

        trace!("Generated {} moves from {}", successors.len(), position);

        Ok(successors)
    }

    fn feature_vector(&self, position: &PositionHandle) -> Result<Vec<f32>> {
        Ok(self.get_position(position)?.to_features())
    }

    fn terminal_result(&self, position: &PositionHandle) -> Result<TerminalResult> {
        self.get_position(position)?
            .is_terminal()
            .ok_or_else(|| EngineFault::NotTerminal(position.key()).into())
    }

    fn release(&self, position: PositionHandle) {
        self.positions.lock().by_key.remove(&position.key());
    }

    fn describe(&self, position: &PositionHandle) -> Result<String> {
        Ok(self.get_position(position)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position_has_seven_successors() {
        let engine = Engine::new();
        let root = engine.initial_position().unwrap();

        let successors = engine.successors(&root).unwrap();

        assert_eq!(successors.len(), 7);
        assert_eq!(engine.live_positions(), 8);
    }

    #[test]
    fn test_feature_vector_width() {
        let engine = Engine::new();
        let root = engine.initial_position().unwrap();

        let features = engine.feature_vector(&root).unwrap();

        assert_eq!(features.len(), engine.feature_width());
        assert!(features.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_release_frees_position_and_is_idempotent() {
        let engine = Engine::new();
        let root = engine.initial_position().unwrap();
        let key = root.key();

        engine.release(root);
        engine.release(PositionHandle::from_key(key));

        assert_eq!(engine.live_positions(), 0);
        let err = engine
            .successors(&PositionHandle::from_key(key))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineFault>(),
            Some(&EngineFault::UnknownPosition(key))
        );
    }

    #[test]
    fn test_terminal_result_of_unfinished_game_is_fault() {
        let engine = Engine::new();
        let root = engine.initial_position().unwrap();

        let err = engine.terminal_result(&root).unwrap_err();

        assert_eq!(
            err.downcast_ref::<EngineFault>(),
            Some(&EngineFault::NotTerminal(root.key()))
        );
    }

    #[test]
    fn test_playing_first_column_reaches_terminal() {
        let engine = Engine::new();
        let mut position = engine.initial_position().unwrap();

        loop {
            let mut successors = engine.successors(&position).unwrap();
            if successors.is_empty() {
                break;
            }

            let next = successors.remove(0);
            for other in successors {
                engine.release(other);
            }
            engine.release(position);
            position = next;
        }

        let result = engine.terminal_result(&position).unwrap();

        assert!(result.winner);
        assert!(result.margin > 0);
        assert_eq!(engine.live_positions(), 1);
        assert!(engine.describe(&position).unwrap().contains('X'));
    }
}
